use crate::config::types::{
    Config, CrawlerConfig, PageKindEntry, RuleEntry, UserAgentConfig,
};
use crate::strategy::ExtractionRule;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
///
/// Everything that can make a crawl fail as a whole is rejected here, before
/// the first task is scheduled. Once a configuration passes, only individual
/// pages can fail.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_page_kinds(&config.page_kinds)?;
    validate_rules(&config.rules, config.crawler.max_depth)?;
    Ok(())
}

/// Validates the seed list: non-empty, absolute HTTP(S) URLs
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.fetch_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "fetch_retries must be <= 10, got {}",
            config.fetch_retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates page-kind markers
fn validate_page_kinds(entries: &[PageKindEntry]) -> Result<(), ConfigError> {
    for entry in entries {
        if entry.url_contains.is_empty() {
            return Err(ConfigError::Validation(format!(
                "page kind '{}' needs a non-empty url-contains marker",
                entry.kind
            )));
        }
    }

    Ok(())
}

/// Validates extraction rules by compiling them
fn validate_rules(rules: &[RuleEntry], max_depth: u32) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in rules {
        let rule = ExtractionRule::from_entry(entry)?;

        if !seen.insert((rule.depth, rule.kind)) {
            return Err(ConfigError::DuplicateRule {
                depth: rule.depth,
                kind: rule
                    .kind
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "any".to_string()),
            });
        }

        if rule.depth > max_depth {
            tracing::warn!(
                "Rule for depth {} can never apply with max-depth {}",
                rule.depth,
                max_depth
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::output::RecordKind;
    use crate::strategy::PageKind;

    fn rule(depth: u32) -> RuleEntry {
        RuleEntry {
            depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_seeds_rejected() {
        let result = validate_seeds(&[]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_seed_must_be_absolute_http() {
        assert!(validate_seeds(&["https://example.com/a".to_string()]).is_ok());
        assert!(validate_seeds(&["http://127.0.0.1:8080/".to_string()]).is_ok());

        assert!(matches!(
            validate_seeds(&["/relative".to_string()]),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_seeds(&["ftp://example.com/".to_string()]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_crawler_bounds() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.max_concurrent_fetches = 101;
        assert!(validate_crawler_config(&config).is_err());

        config.max_concurrent_fetches = 1;
        config.fetch_retries = 11;
        assert!(validate_crawler_config(&config).is_err());

        config.fetch_retries = 3;
        config.request_timeout_secs = 0;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_crawler_name() {
        let mut config = UserAgentConfig::default();
        assert!(validate_user_agent_config(&config).is_ok());

        config.crawler_name = "My Bot".to_string();
        assert!(validate_user_agent_config(&config).is_err());

        config.crawler_name = "My-Bot".to_string();
        config.contact_url = Some("not a url".to_string());
        assert!(matches!(
            validate_user_agent_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let entries = vec![PageKindEntry {
            kind: PageKind::Interface,
            url_contains: String::new(),
        }];
        assert!(validate_page_kinds(&entries).is_err());
    }

    #[test]
    fn test_bad_selector_rejected() {
        let mut entry = rule(0);
        entry.link_selector = Some("a[[[".to_string());

        let result = validate_rules(&[entry], 2);
        assert!(matches!(result, Err(ConfigError::InvalidSelector { .. })));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let result = validate_rules(&[rule(1), rule(1)], 2);
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateRule { depth: 1, .. })
        ));
    }

    #[test]
    fn test_same_depth_different_kinds_allowed() {
        let mut a = rule(0);
        a.kind = Some(PageKind::Enumeration);
        let b = rule(0);

        assert!(validate_rules(&[a, b], 2).is_ok());
    }

    #[test]
    fn test_page_detail_requires_detail_table() {
        let mut entry = rule(1);
        entry.data_selector = Some("body".to_string());
        entry.record = RecordKind::PageDetail;

        assert!(matches!(
            validate_rules(&[entry], 2),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rule_beyond_max_depth_is_accepted() {
        assert!(validate_rules(&[rule(5)], 2).is_ok());
    }

    #[test]
    fn test_full_validation_through_parser() {
        let content = r#"
seeds = ["https://example.com/"]

[[rule]]
depth = 0
data-selector = "pre"
record = "code-example"
"#;
        assert!(parse_config(content).is_ok());
    }
}
