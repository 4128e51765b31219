//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `DocumentFetcher` trait
//! - HTML parsing and rule-driven record/link extraction
//! - The visited registry and result aggregator shared by a crawl
//! - Task scheduling under a global concurrency bound
//! - Overall crawl coordination

mod aggregator;
mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod registry;
mod scheduler;
mod session;
mod task;

pub use aggregator::ResultAggregator;
pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use extractor::{extract_page, PageExtraction};
pub use fetcher::{
    build_http_client, DocumentFetcher, FetchError, FetchOptions, FetchedDocument, HttpFetcher,
    RetryingFetcher,
};
pub use parser::PageDocument;
pub use registry::VisitedRegistry;
pub use scheduler::{ScheduledTask, Scheduler};
pub use session::CrawlSession;
pub use task::{CrawlTask, TaskOutcome, TaskReport, TaskTracker};
