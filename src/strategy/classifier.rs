use crate::config::PageKindEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Kind of documentation page, used to pick between rules at the same depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// No configured marker matched
    Generic,
    /// Index of enumerations and their constants
    Enumeration,
    /// Index of interfaces
    Interface,
    /// Single member page (method, property)
    Member,
    /// Code example page
    Example,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Enumeration => "enumeration",
            Self::Interface => "interface",
            Self::Member => "member",
            Self::Example => "example",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies pages by URL markers
///
/// Markers are checked in configuration order and the first one contained in
/// the URL wins. Pages without a matching marker are [`PageKind::Generic`].
///
/// # Examples
///
/// ```
/// use docs_ripple::strategy::{PageClassifier, PageKind};
/// use url::Url;
///
/// let classifier = PageClassifier::new(vec![("swconst".to_string(), PageKind::Enumeration)]);
/// let url = Url::parse("https://help.example.com/api/swconst/index.htm").unwrap();
/// assert_eq!(classifier.classify(&url), PageKind::Enumeration);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageClassifier {
    markers: Vec<(String, PageKind)>,
}

impl PageClassifier {
    pub fn new(markers: Vec<(String, PageKind)>) -> Self {
        Self { markers }
    }

    /// Builds a classifier from `[[page-kind]]` config entries
    pub fn from_entries(entries: &[PageKindEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| (e.url_contains.clone(), e.kind))
                .collect(),
        )
    }

    pub fn classify(&self, url: &Url) -> PageKind {
        let url = url.as_str();
        self.markers
            .iter()
            .find(|(marker, _)| url.contains(marker.as_str()))
            .map(|(_, kind)| *kind)
            .unwrap_or(PageKind::Generic)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
