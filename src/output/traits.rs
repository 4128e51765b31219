//! Output sink trait and error types
//!
//! This module defines the interface the crawler hands its finished result
//! set to, and the errors a sink can report.

use crate::output::ResultSet;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result persistence
///
/// A sink receives the complete result set once the crawl frontier is
/// exhausted. The serialized form must contain one element per record.
pub trait ResultSink {
    /// Persists the result set
    ///
    /// # Arguments
    ///
    /// * `results` - Every record extracted during the crawl
    fn persist(&self, results: &ResultSet) -> OutputResult<()>;

    /// Human-readable description of where results go
    fn describe(&self) -> String;
}
