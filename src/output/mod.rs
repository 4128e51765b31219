//! Output module for crawl results
//!
//! This module handles:
//! - The scraped record types and the result set
//! - Persisting results (JSON array on disk)
//! - Recording and printing crawl statistics

mod json;
mod records;
pub mod stats;
mod traits;

pub use json::{load_results, JsonFileSink};
pub use records::{
    CodeExampleRecord, ConstantRecord, LinkRecord, PageDetailRecord, RecordKind, ResultSet,
    ScrapedRecord,
};
pub use stats::{print_result_summary, print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, ResultSink};
