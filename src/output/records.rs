//! Scraped record types and the result set handed to persistence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which record variant a rule's data nodes become
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// Constant or enumeration member with its description
    #[default]
    Constant,
    /// Link title and target
    Link,
    /// Code snippet from an example page
    CodeExample,
    /// Structured member page (remarks, accessors, examples, see-also)
    PageDetail,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Link => "link",
            Self::CodeExample => "code-example",
            Self::PageDetail => "page-detail",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantRecord {
    pub name: String,
    pub description: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub title: String,
    pub target_url: String,
    pub parent_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExampleRecord {
    pub title: String,
    pub snippet: String,
    pub language: String,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetailRecord {
    pub source_url: String,
    pub remarks: String,
    pub accessors: Vec<String>,
    pub examples: Vec<String>,
    pub see_also: Vec<String>,
}

/// One extracted record, tagged with its variant in JSON
///
/// Records are created while extracting a single page and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScrapedRecord {
    Constant(ConstantRecord),
    Link(LinkRecord),
    CodeExample(CodeExampleRecord),
    PageDetail(PageDetailRecord),
}

impl ScrapedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Constant(_) => RecordKind::Constant,
            Self::Link(_) => RecordKind::Link,
            Self::CodeExample(_) => RecordKind::CodeExample,
            Self::PageDetail(_) => RecordKind::PageDetail,
        }
    }

    /// URL of the page the record was extracted from
    pub fn source_url(&self) -> &str {
        match self {
            Self::Constant(r) => &r.source_url,
            Self::Link(r) => &r.parent_url,
            Self::CodeExample(r) => &r.source_url,
            Self::PageDetail(r) => &r.source_url,
        }
    }
}

/// Ordered collection of scraped records
///
/// Append order is kept but carries no meaning; two crawls of the same site
/// should be compared as multisets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<ScrapedRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScrapedRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ScrapedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ScrapedRecord> {
        self.records
    }

    /// Number of records per variant
    pub fn count_by_kind(&self) -> BTreeMap<RecordKind, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Records sorted into a canonical order, for order-independent comparison
    pub fn sorted(&self) -> Vec<ScrapedRecord> {
        let mut records = self.records.clone();
        records.sort();
        records
    }
}

impl From<Vec<ScrapedRecord>> for ResultSet {
    fn from(records: Vec<ScrapedRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for ResultSet {
    type Item = ScrapedRecord;
    type IntoIter = std::vec::IntoIter<ScrapedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ScrapedRecord;
    type IntoIter = std::slice::Iter<'a, ScrapedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
