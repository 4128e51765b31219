use crate::config::{DetailEntry, RuleEntry};
use crate::output::RecordKind;
use crate::strategy::PageKind;
use crate::ConfigError;
use scraper::Selector;
use std::fmt;

/// A compiled CSS selector that remembers its source text for logging
#[derive(Debug, Clone)]
pub struct RuleSelector {
    source: String,
    selector: Selector,
}

impl RuleSelector {
    /// Parses a CSS selector
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSelector` when the selector does not parse.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let selector = Selector::parse(source).map_err(|e| ConfigError::InvalidSelector {
            selector: source.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for RuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Sub-selectors for page-detail records, queried inside each data node
#[derive(Debug, Clone, Default)]
pub struct DetailSelectors {
    pub remarks: Option<RuleSelector>,
    pub accessors: Option<RuleSelector>,
    pub examples: Option<RuleSelector>,
    pub see_also: Option<RuleSelector>,
}

impl DetailSelectors {
    fn from_entry(entry: &DetailEntry) -> Result<Self, ConfigError> {
        Ok(Self {
            remarks: parse_optional(entry.remarks.as_deref())?,
            accessors: parse_optional(entry.accessors.as_deref())?,
            examples: parse_optional(entry.examples.as_deref())?,
            see_also: parse_optional(entry.see_also.as_deref())?,
        })
    }
}

/// Extraction policy for one crawl depth (and optionally one page kind)
///
/// Rules are immutable once compiled. A rule with `terminal` set still
/// records data but never yields child links, whatever its link selector
/// matches.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub depth: u32,
    pub kind: Option<PageKind>,
    pub link_selector: Option<RuleSelector>,
    pub data_selector: Option<RuleSelector>,
    pub record: RecordKind,
    pub terminal: bool,
    pub child_kind: Option<PageKind>,
    pub language: Option<String>,
    pub detail: Option<DetailSelectors>,
}

impl ExtractionRule {
    /// A rule for `depth` that records nothing and follows nothing
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            kind: None,
            link_selector: None,
            data_selector: None,
            record: RecordKind::default(),
            terminal: false,
            child_kind: None,
            language: None,
            detail: None,
        }
    }

    /// Compiles a `[[rule]]` config entry
    pub fn from_entry(entry: &RuleEntry) -> Result<Self, ConfigError> {
        if entry.record == RecordKind::PageDetail && entry.detail.is_none() {
            return Err(ConfigError::Validation(format!(
                "rule for depth {} records page details but has no [rule.detail] table",
                entry.depth
            )));
        }

        let detail = match &entry.detail {
            Some(detail) => Some(DetailSelectors::from_entry(detail)?),
            None => None,
        };

        Ok(Self {
            depth: entry.depth,
            kind: entry.kind,
            link_selector: parse_optional(entry.link_selector.as_deref())?,
            data_selector: parse_optional(entry.data_selector.as_deref())?,
            record: entry.record,
            terminal: entry.terminal,
            child_kind: entry.child_kind,
            language: entry.language.clone(),
            detail,
        })
    }

    /// Whether this rule can yield child links at all
    pub fn follows_links(&self) -> bool {
        !self.terminal && self.link_selector.is_some()
    }
}

fn parse_optional(source: Option<&str>) -> Result<Option<RuleSelector>, ConfigError> {
    source.map(RuleSelector::parse).transpose()
}
