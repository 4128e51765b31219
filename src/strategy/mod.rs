//! Extraction strategy module
//!
//! Holds the static extraction configuration the crawler dispatches on:
//! - Page-kind classification by URL marker
//! - Compiled extraction rules (link selector, data selector, terminal flag)
//! - The depth-indexed strategy table

mod classifier;
mod rule;
mod table;

pub use classifier::{PageClassifier, PageKind};
pub use rule::{DetailSelectors, ExtractionRule, RuleSelector};
pub use table::StrategyTable;
