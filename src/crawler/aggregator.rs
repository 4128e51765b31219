//! Result aggregator shared by all tasks of a crawl

use crate::output::{ResultSet, ScrapedRecord};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only collection of scraped records
///
/// Appends from concurrent tasks are serialized; records are never lost or
/// duplicated. Order across tasks follows completion order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Mutex<Vec<ScrapedRecord>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: ScrapedRecord) {
        self.lock().push(record);
    }

    /// Appends every record of one page, keeping their relative order
    pub fn extend(&self, records: impl IntoIterator<Item = ScrapedRecord>) {
        self.lock().extend(records);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Moves the collected records out, leaving the aggregator empty
    pub fn take(&self) -> ResultSet {
        ResultSet::from(std::mem::take(&mut *self.lock()))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScrapedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{ConstantRecord, LinkRecord};
    use std::sync::Arc;

    fn constant(name: &str) -> ScrapedRecord {
        ScrapedRecord::Constant(ConstantRecord {
            name: name.to_string(),
            description: String::new(),
            source_url: "https://example.com/a".to_string(),
        })
    }

    #[test]
    fn test_append_and_take() {
        let aggregator = ResultAggregator::new();
        aggregator.append(constant("A"));
        aggregator.extend(vec![
            constant("B"),
            ScrapedRecord::Link(LinkRecord {
                title: "C".to_string(),
                target_url: "https://example.com/c".to_string(),
                parent_url: "https://example.com/a".to_string(),
            }),
        ]);

        assert_eq!(aggregator.len(), 3);

        let results = aggregator.take();
        assert_eq!(results.len(), 3);
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_extend_keeps_page_order() {
        let aggregator = ResultAggregator::new();
        aggregator.extend(vec![constant("first"), constant("second")]);

        let names: Vec<_> = aggregator
            .take()
            .into_iter()
            .map(|r| match r {
                ScrapedRecord::Constant(c) => c.name,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let aggregator = Arc::new(ResultAggregator::new());

        let mut handles = Vec::new();
        for i in 0..32 {
            let aggregator = Arc::clone(&aggregator);
            handles.push(tokio::spawn(async move {
                for j in 0..10 {
                    aggregator.append(constant(&format!("{}-{}", i, j)));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(aggregator.len(), 320);
    }
}
