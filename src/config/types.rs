use crate::output::RecordKind;
use crate::strategy::PageKind;
use serde::Deserialize;

/// Main configuration structure for Docs-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URLs, crawled at depth 0
    pub seeds: Vec<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub url: UrlConfig,

    #[serde(rename = "page-kind", default)]
    pub page_kinds: Vec<PageKindEntry>,

    #[serde(rename = "rule", default)]
    pub rules: Vec<RuleEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of link hops from a seed URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of page fetches in flight at once
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: u32,

    /// Whole-request timeout in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    /// Extra attempts for transient fetch failures
    #[serde(rename = "fetch-retries", default)]
    pub fetch_retries: u32,

    /// Delay between fetch attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            fetch_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_concurrent_fetches() -> u32 {
    8
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

fn default_crawler_name() -> String {
    "DocsRipple".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON results file
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,

    /// Pretty-print the JSON array
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
            pretty: default_pretty(),
        }
    }
}

fn default_results_path() -> String {
    "scraped_data.json".to_string()
}

fn default_pretty() -> bool {
    true
}

/// URL canonicalization policy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlConfig {
    /// Treat `page#a` and `page#b` as distinct pages
    #[serde(rename = "keep-fragments", default)]
    pub keep_fragments: bool,
}

/// Maps a URL marker to a page kind
#[derive(Debug, Clone, Deserialize)]
pub struct PageKindEntry {
    pub kind: PageKind,

    /// Substring that identifies pages of this kind
    #[serde(rename = "url-contains")]
    pub url_contains: String,
}

/// One extraction rule as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleEntry {
    pub depth: u32,

    /// Restrict the rule to pages of this kind
    #[serde(default)]
    pub kind: Option<PageKind>,

    #[serde(rename = "link-selector", default)]
    pub link_selector: Option<String>,

    #[serde(rename = "data-selector", default)]
    pub data_selector: Option<String>,

    /// Which record variant data nodes become
    #[serde(default)]
    pub record: RecordKind,

    /// Record data but never follow links from this depth
    #[serde(default)]
    pub terminal: bool,

    /// Page kind assigned to child tasks, skipping classification
    #[serde(rename = "child-kind", default)]
    pub child_kind: Option<PageKind>,

    /// Fallback language for code examples
    #[serde(default)]
    pub language: Option<String>,

    /// Sub-selectors for page-detail records
    #[serde(default)]
    pub detail: Option<DetailEntry>,
}

/// Sub-selectors queried inside each page-detail data node
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailEntry {
    #[serde(default)]
    pub remarks: Option<String>,

    #[serde(default)]
    pub accessors: Option<String>,

    #[serde(default)]
    pub examples: Option<String>,

    #[serde(rename = "see-also", default)]
    pub see_also: Option<String>,
}
