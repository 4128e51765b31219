//! Docs-Ripple main entry point
//!
//! This is the command-line interface for the Docs-Ripple documentation crawler.

use anyhow::Context;
use clap::Parser;
use docs_ripple::config::{load_config_with_hash, Config};
use docs_ripple::output::{
    load_results, print_result_summary, print_statistics, JsonFileSink, ResultSink,
};
use docs_ripple::{run_crawl, StrategyTable};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Docs-Ripple: a depth-bounded documentation crawler
///
/// Docs-Ripple starts from a set of seed pages, follows links for a fixed
/// number of hops, and extracts structured records (constants, links, code
/// examples, page details) with per-depth CSS selector rules.
#[derive(Parser, Debug)]
#[command(name = "docs-ripple")]
#[command(version)]
#[command(about = "A depth-bounded documentation crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the extraction rules without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Summarize an existing results file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Results file to write (overrides output.results-path)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let results_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.results_path));

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&results_path)
    } else {
        handle_crawl(config, results_path, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docs_ripple=info,warn"),
            1 => EnvFilter::new("docs_ripple=debug,info"),
            2 => EnvFilter::new("docs_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let table = StrategyTable::from_config(config)?;

    println!("=== Docs-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Fetch retries: {}", config.crawler.fetch_retries);
    println!("  Keep fragments: {}", config.url.keep_fragments);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    if !config.page_kinds.is_empty() {
        println!("\nPage Kinds ({}):", config.page_kinds.len());
        for entry in &config.page_kinds {
            println!("  - {} when URL contains {:?}", entry.kind, entry.url_contains);
        }
    }

    println!("\nExtraction Rules ({}):", table.len());
    for rule in table.rules() {
        let kind = rule.kind.map(|k| k.to_string()).unwrap_or_else(|| "*".to_string());
        println!("  - depth {} [{}] -> {}", rule.depth, kind, rule.record);
        if let Some(selector) = &rule.data_selector {
            println!("      data: {}", selector);
        }
        if let Some(selector) = &rule.link_selector {
            println!("      links: {}", selector);
        }
        if rule.terminal {
            println!("      terminal");
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.seeds.len()
    );

    Ok(())
}

/// Handles the --stats mode: summarizes an existing results file
fn handle_stats(results_path: &Path) -> anyhow::Result<()> {
    println!("Results: {}\n", results_path.display());

    let results = load_results(results_path)
        .with_context(|| format!("Failed to read results {}", results_path.display()))?;
    print_result_summary(&results);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, results_path: PathBuf, quiet: bool) -> anyhow::Result<()> {
    let sink = JsonFileSink::new(results_path, config.output.pretty);

    tracing::info!(
        "Seeds: {}, rules: {}, results: {}",
        config.seeds.len(),
        config.rules.len(),
        sink.describe()
    );

    let outcome = match run_crawl(config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    sink.persist(&outcome.results)
        .with_context(|| format!("Failed to write results to {}", sink.describe()))?;

    if !quiet {
        print_statistics(&outcome.statistics);
    }

    Ok(())
}
