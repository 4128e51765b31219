use crate::config::Config;
use crate::strategy::{ExtractionRule, PageClassifier, PageKind};
use crate::ConfigError;
use std::collections::HashMap;
use url::Url;

/// Depth-indexed lookup of extraction rules
///
/// Dispatch is by depth first. Within a depth, a rule bound to the page's
/// kind wins over the depth's kind-agnostic rule. A depth with no rule at all
/// extracts nothing and follows nothing.
#[derive(Debug, Clone, Default)]
pub struct StrategyTable {
    rules: HashMap<(u32, Option<PageKind>), ExtractionRule>,
    classifier: PageClassifier,
}

impl StrategyTable {
    /// Builds a table from compiled rules
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateRule` if two rules share a depth and kind.
    pub fn new(rules: Vec<ExtractionRule>, classifier: PageClassifier) -> Result<Self, ConfigError> {
        let mut table = HashMap::with_capacity(rules.len());

        for rule in rules {
            let key = (rule.depth, rule.kind);
            if table.insert(key, rule).is_some() {
                return Err(ConfigError::DuplicateRule {
                    depth: key.0,
                    kind: key
                        .1
                        .map(|k| k.to_string())
                        .unwrap_or_else(|| "any".to_string()),
                });
            }
        }

        Ok(Self {
            rules: table,
            classifier,
        })
    }

    /// Compiles the `[[rule]]` and `[[page-kind]]` sections of a config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let rules = config
            .rules
            .iter()
            .map(ExtractionRule::from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rules, PageClassifier::from_entries(&config.page_kinds))
    }

    /// Classifies a page by its URL
    pub fn classify(&self, url: &Url) -> PageKind {
        self.classifier.classify(url)
    }

    /// Resolves the rule for a page at `depth` of the given kind
    pub fn strategy_for(&self, depth: u32, kind: PageKind) -> Option<&ExtractionRule> {
        self.rules
            .get(&(depth, Some(kind)))
            .or_else(|| self.rules.get(&(depth, None)))
    }

    /// Iterates the rules ordered by depth, kind-agnostic rules first
    pub fn rules(&self) -> Vec<&ExtractionRule> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by_key(|r| (r.depth, r.kind));
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
