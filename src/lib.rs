//! Docs-Ripple: a depth-bounded documentation crawler
//!
//! Starting from a set of seed pages, the crawler follows links through a fixed
//! number of hops, applies a depth-indexed extraction rule to every page it
//! visits, and accumulates the extracted records into a single result set.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod strategy;
pub mod url;

use thiserror::Error;

/// Main error type for Docs-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid task state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::TaskState,
        to: state::TaskState,
    },

    #[error("Crawl task error: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Duplicate extraction rule for depth {depth} and kind {kind}")]
    DuplicateRule { depth: u32, kind: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Link only points at a fragment of the same page: {0}")]
    FragmentOnly(String),

    #[error("Empty link target")]
    Empty,
}

/// Result type alias for Docs-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlOutcome, Coordinator};
pub use output::{RecordKind, ResultSet, ScrapedRecord};
pub use state::TaskState;
pub use strategy::{ExtractionRule, PageKind, StrategyTable};
pub use crate::url::{canonicalize, resolve_link};
