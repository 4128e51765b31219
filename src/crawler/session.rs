//! Per-crawl shared state

use super::aggregator::ResultAggregator;
use super::registry::VisitedRegistry;
use crate::output::ResultSet;

/// The visited registry and result aggregator of one crawl
///
/// Every task of a crawl sees the same session; separate crawls get
/// separate sessions.
#[derive(Debug, Default)]
pub struct CrawlSession {
    pub registry: VisitedRegistry,
    pub results: ResultAggregator,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both the registry and any collected records
    pub fn reset(&self) {
        self.registry.clear();
        self.results.take();
    }

    /// Moves the collected records out
    pub fn take_results(&self) -> ResultSet {
        self.results.take()
    }
}
