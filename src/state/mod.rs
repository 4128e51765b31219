//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskState`: Tracks the state of an individual crawl task
//!   (pending, fetching, extracting, dispatched, done, failed)

mod task_state;

// Re-export main types
pub use task_state::TaskState;
