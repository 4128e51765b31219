//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Seeding the frontier from the configured seeds
//! - Dispatching tasks under the concurrency bound
//! - Per-task processing (dedup, fetch, extract, dispatch children)
//! - Collecting reports and statistics until the frontier drains

use super::extractor::{extract_page, PageExtraction};
use super::fetcher::{DocumentFetcher, FetchOptions, HttpFetcher, RetryingFetcher};
use super::parser::PageDocument;
use super::scheduler::{ScheduledTask, Scheduler};
use super::session::CrawlSession;
use super::task::{CrawlTask, TaskOutcome, TaskReport, TaskTracker};
use crate::config::{validate, Config, UrlConfig};
use crate::output::{CrawlStatistics, ResultSet};
use crate::state::TaskState;
use crate::strategy::StrategyTable;
use crate::url::parse_seed;
use crate::RippleError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinSet};
use url::Url;

/// Everything a crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    pub results: ResultSet,
    pub statistics: CrawlStatistics,
}

/// State shared read-only by every task of a crawl
struct CrawlContext {
    session: CrawlSession,
    table: StrategyTable,
    fetcher: Arc<dyn DocumentFetcher>,
    fetch_options: FetchOptions,
    url_policy: UrlConfig,
    max_depth: u32,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    context: Arc<CrawlContext>,
    seeds: Vec<Url>,
    max_concurrent: u32,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or the HTTP client cannot be
    /// built. Nothing has been fetched at that point.
    pub fn new(config: Config) -> Result<Self, RippleError> {
        let http = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        let fetcher = RetryingFetcher::new(
            http,
            config.crawler.fetch_retries,
            Duration::from_millis(config.crawler.retry_delay_ms),
        );

        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a coordinator around any document source
    pub fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Result<Self, RippleError> {
        validate(&config)?;

        let table = StrategyTable::from_config(&config)?;
        let seeds = config
            .seeds
            .iter()
            .map(|seed| parse_seed(seed, &config.url))
            .collect::<Result<Vec<_>, _>>()?;

        let context = CrawlContext {
            session: CrawlSession::new(),
            table,
            fetcher,
            fetch_options: FetchOptions {
                user_agent: Some(config.user_agent.header_value()),
            },
            url_policy: config.url.clone(),
            max_depth: config.crawler.max_depth,
        };

        Ok(Self {
            context: Arc::new(context),
            seeds,
            max_concurrent: config.crawler.max_concurrent_fetches,
        })
    }

    /// The session shared by this coordinator's tasks
    pub fn session(&self) -> &CrawlSession {
        &self.context.session
    }

    /// Canonical seed URLs
    pub fn seeds(&self) -> &[Url] {
        &self.seeds
    }

    /// Runs the crawl until no task is queued or in flight
    ///
    /// Each run starts from an empty visited registry and result set, so
    /// running twice against an unchanged site yields the same records.
    /// Individual page failures never abort the run.
    pub async fn run(&mut self) -> Result<CrawlOutcome, RippleError> {
        self.context.session.reset();

        let mut scheduler = Scheduler::new(self.max_concurrent, self.context.max_depth);
        for seed in &self.seeds {
            scheduler.schedule(CrawlTask::seed(seed.clone()));
        }

        tracing::info!(
            "Starting crawl: {} seeds, max depth {}, {} concurrent fetches",
            self.seeds.len(),
            self.context.max_depth,
            self.max_concurrent
        );

        let mut stats = CrawlStatistics::new(self.seeds.len());
        let mut in_flight: JoinSet<TaskReport> = JoinSet::new();
        let mut in_flight_urls: HashMap<Id, String> = HashMap::new();

        loop {
            while let Some(scheduled) = scheduler.try_next() {
                let url = scheduled.task.url().to_string();
                let context = Arc::clone(&self.context);
                let handle = in_flight.spawn(async move {
                    let ScheduledTask { task, _permit } = scheduled;
                    process_task(&context, task).await
                });
                in_flight_urls.insert(handle.id(), url);
            }

            let Some(joined) = in_flight.join_next_with_id().await else {
                break;
            };

            match joined {
                Ok((id, report)) => {
                    in_flight_urls.remove(&id);
                    stats.record_report(&report);
                    for child in report.into_children() {
                        scheduler.schedule(child);
                    }
                }
                Err(e) => {
                    // A panicking task loses its report; its URL is still known
                    let url = in_flight_urls
                        .remove(&e.id())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    let error = RippleError::Task(e.to_string());
                    tracing::error!("Error scraping {}: {}", url, error);
                    stats.record_aborted(&url, &error.to_string());
                }
            }

            if stats.tasks_run % 50 == 0 {
                tracing::info!(
                    "Progress: {} tasks run, {} queued, {} in flight",
                    stats.tasks_run,
                    scheduler.frontier_size(),
                    in_flight.len()
                );
            }
        }

        let results = self.context.session.take_results();
        stats.finish(&results);

        tracing::info!(
            "Crawl completed: {} pages, {} failed, {} records",
            stats.pages_completed,
            stats.pages_failed,
            results.len()
        );

        Ok(CrawlOutcome {
            results,
            statistics: stats,
        })
    }
}

/// Executes one task; every failure is folded into the report
async fn process_task(context: &CrawlContext, task: CrawlTask) -> TaskReport {
    let mut tracker = TaskTracker::new(task.url());

    match execute(context, &task, &mut tracker).await {
        Ok(outcome) => TaskReport::new(&task, outcome),
        Err(e) => {
            let reason = match e {
                RippleError::Fetch(fetch) => fetch.to_string(),
                other => other.to_string(),
            };
            tracing::warn!("Error scraping {}: {}", task.url(), reason);
            tracker.fail();
            TaskReport::new(&task, TaskOutcome::Failed { reason })
        }
    }
}

async fn execute(
    context: &CrawlContext,
    task: &CrawlTask,
    tracker: &mut TaskTracker,
) -> Result<TaskOutcome, RippleError> {
    if !context.session.registry.try_visit(task.url()) {
        tracing::debug!("Skipping already visited URL: {}", task.url());
        tracker.advance(TaskState::Done)?;
        return Ok(TaskOutcome::Duplicate);
    }

    tracker.advance(TaskState::Fetching)?;
    tracing::info!("Scraping (depth {}): {}", task.depth(), task.url());

    let fetched = context
        .fetcher
        .fetch(task.url(), &context.fetch_options)
        .await?;

    tracker.advance(TaskState::Extracting)?;

    let kind = task
        .kind()
        .unwrap_or_else(|| context.table.classify(task.url()));

    let (extraction, child_kind) = match context.table.strategy_for(task.depth(), kind) {
        Some(rule) => {
            let follow_links = task.depth() < context.max_depth && rule.follows_links();
            let document = PageDocument::parse(&fetched.body, &fetched.url);
            let extraction = extract_page(
                &document,
                task.url(),
                rule,
                follow_links,
                &context.url_policy,
            );
            (extraction, rule.child_kind)
        }
        None => {
            tracing::debug!(
                "No extraction rule for depth {} ({}): {}",
                task.depth(),
                kind,
                task.url()
            );
            (PageExtraction::default(), None)
        }
    };

    let PageExtraction {
        records,
        links,
        links_dropped,
    } = extraction;

    let record_count = records.len();
    context.session.results.extend(records);

    let children: Vec<CrawlTask> = links
        .into_iter()
        .filter_map(|url| task.child(url, child_kind, context.max_depth))
        .collect();

    for child in &children {
        tracing::debug!("Extracted link: {} at depth {}", child.url(), child.depth());
    }

    tracker.advance(TaskState::Dispatched)?;
    tracker.advance(TaskState::Done)?;

    Ok(TaskOutcome::Completed {
        records: record_count,
        links_dropped,
        children,
    })
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use docs_ripple::config::parse_config;
/// use docs_ripple::run_crawl;
///
/// # async fn demo() -> Result<(), docs_ripple::RippleError> {
/// let config = parse_config(r#"
/// seeds = ["https://help.example.com/api/index.htm"]
///
/// [[rule]]
/// depth = 0
/// data-selector = "code"
/// record = "constant"
/// "#)?;
/// let outcome = run_crawl(config).await?;
/// println!("{} records", outcome.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, RippleError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
