//! Crawl statistics
//!
//! Counters collected by the coordinator while tasks complete, and the
//! console report printed at the end of a run.

use crate::crawler::{TaskOutcome, TaskReport};
use crate::output::{RecordKind, ResultSet};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the frontier was exhausted
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of seed tasks
    pub seeds: u64,

    /// Task executions joined, duplicates included
    pub tasks_run: u64,

    /// Pages fetched and extracted
    pub pages_completed: u64,

    /// Pages whose fetch failed or whose task panicked
    pub pages_failed: u64,

    /// Tasks suppressed by the visited registry
    pub duplicates_skipped: u64,

    /// Links dropped because they could not be resolved
    pub links_dropped: u64,

    /// Child tasks handed back to the scheduler
    pub children_scheduled: u64,

    /// Completed pages per depth
    pub pages_by_depth: BTreeMap<u32, u64>,

    /// Records per variant (filled in by `finish`)
    pub records_by_kind: BTreeMap<RecordKind, u64>,

    /// Failed URLs with the reason
    pub failures: Vec<(String, String)>,
}

impl CrawlStatistics {
    pub fn new(seeds: usize) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            seeds: seeds as u64,
            tasks_run: 0,
            pages_completed: 0,
            pages_failed: 0,
            duplicates_skipped: 0,
            links_dropped: 0,
            children_scheduled: 0,
            pages_by_depth: BTreeMap::new(),
            records_by_kind: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    /// Folds one finished task into the counters
    pub fn record_report(&mut self, report: &TaskReport) {
        self.tasks_run += 1;

        match &report.outcome {
            TaskOutcome::Duplicate => self.duplicates_skipped += 1,
            TaskOutcome::Failed { reason } => {
                self.record_failure(&report.url, reason);
            }
            TaskOutcome::Completed {
                links_dropped,
                children,
                ..
            } => {
                self.pages_completed += 1;
                self.links_dropped += *links_dropped as u64;
                self.children_scheduled += children.len() as u64;
                *self.pages_by_depth.entry(report.depth).or_insert(0) += 1;
            }
        }
    }

    /// Counts a task that never produced a report (it panicked)
    pub fn record_aborted(&mut self, url: &str, reason: &str) {
        self.tasks_run += 1;
        self.record_failure(url, reason);
    }

    fn record_failure(&mut self, url: &str, reason: &str) {
        self.pages_failed += 1;
        self.failures.push((url.to_string(), reason.to_string()));
    }

    /// Stamps the finish time and counts records per variant
    pub fn finish(&mut self, results: &ResultSet) {
        self.finished_at = Some(Utc::now());
        self.records_by_kind = results
            .count_by_kind()
            .into_iter()
            .map(|(kind, count)| (kind, count as u64))
            .collect();
    }

    pub fn total_records(&self) -> u64 {
        self.records_by_kind.values().sum()
    }

    /// Duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Percentage of fetched pages that completed
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_completed + self.pages_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_completed as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Seeds: {}", stats.seeds);
    println!("  Tasks run: {}", stats.tasks_run);
    println!("  Pages completed: {}", stats.pages_completed);
    println!("  Pages failed: {}", stats.pages_failed);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  Links dropped: {}", stats.links_dropped);
    if let Some(duration) = stats.duration() {
        println!(
            "  Duration: {:.1}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }
    println!();

    if !stats.pages_by_depth.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &stats.pages_by_depth {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    print_record_counts(&stats.records_by_kind);

    if !stats.failures.is_empty() {
        println!("Failures ({}):", stats.failures.len());
        for (url, reason) in &stats.failures {
            println!("  - {}: {}", url, reason);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages)",
        stats.success_rate(),
        stats.pages_completed,
        stats.pages_completed + stats.pages_failed
    );
}

/// Prints record counts of an existing result set
pub fn print_result_summary(results: &ResultSet) {
    println!("=== Result Summary ===\n");
    println!("Total records: {}\n", results.len());

    let counts: BTreeMap<RecordKind, u64> = results
        .count_by_kind()
        .into_iter()
        .map(|(kind, count)| (kind, count as u64))
        .collect();
    print_record_counts(&counts);

    let mut pages: Vec<&str> = results.iter().map(|r| r.source_url()).collect();
    pages.sort_unstable();
    pages.dedup();
    println!("Source pages: {}", pages.len());
}

fn print_record_counts(counts: &BTreeMap<RecordKind, u64>) {
    if counts.is_empty() {
        println!("Records: none\n");
        return;
    }

    println!("Records by Kind:");
    for (kind, count) in counts {
        println!("  {}: {}", kind, count);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::CrawlTask;
    use crate::output::{ConstantRecord, ScrapedRecord};
    use url::Url;

    fn report(depth: u32, outcome: TaskOutcome) -> TaskReport {
        TaskReport {
            url: "https://example.com/page".to_string(),
            depth,
            outcome,
        }
    }

    #[test]
    fn test_record_reports() {
        let mut stats = CrawlStatistics::new(1);
        let child = CrawlTask::seed(Url::parse("https://example.com/child").unwrap());

        stats.record_report(&report(
            0,
            TaskOutcome::Completed {
                records: 2,
                links_dropped: 1,
                children: vec![child],
            },
        ));
        stats.record_report(&report(1, TaskOutcome::Duplicate));
        stats.record_report(&report(
            1,
            TaskOutcome::Failed {
                reason: "HTTP 404".to_string(),
            },
        ));

        assert_eq!(stats.tasks_run, 3);
        assert_eq!(stats.pages_completed, 1);
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(stats.pages_failed, 1);
        assert_eq!(stats.links_dropped, 1);
        assert_eq!(stats.children_scheduled, 1);
        assert_eq!(stats.pages_by_depth.get(&0), Some(&1));
        assert_eq!(stats.failures[0].1, "HTTP 404");
    }

    #[test]
    fn test_record_aborted() {
        let mut stats = CrawlStatistics::new(1);
        stats.record_aborted("https://example.com/boom", "task 2 panicked");

        assert_eq!(stats.tasks_run, 1);
        assert_eq!(stats.pages_failed, 1);
        assert_eq!(
            stats.failures,
            vec![(
                "https://example.com/boom".to_string(),
                "task 2 panicked".to_string()
            )]
        );
    }

    #[test]
    fn test_finish_counts_records() {
        let mut stats = CrawlStatistics::new(1);
        let results = ResultSet::from(vec![ScrapedRecord::Constant(ConstantRecord {
            name: "A".to_string(),
            description: String::new(),
            source_url: "u".to_string(),
        })]);

        stats.finish(&results);

        assert!(stats.finished_at.is_some());
        assert!(stats.duration().is_some());
        assert_eq!(stats.total_records(), 1);
        assert_eq!(stats.records_by_kind.get(&RecordKind::Constant), Some(&1));
    }

    #[test]
    fn test_success_rate() {
        let mut stats = CrawlStatistics::new(1);
        assert_eq!(stats.success_rate(), 0.0);

        stats.pages_completed = 3;
        stats.pages_failed = 1;
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }
}
