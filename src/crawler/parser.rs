//! HTML document wrapper used during extraction
//!
//! This module handles:
//! - Parsing a fetched body into a queryable document
//! - Resolving the document base URL (honoring `<base href>`)
//! - Text helpers shared by the record builders

use crate::strategy::RuleSelector;
use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed page
///
/// `scraper::Html` is not `Send`; a `PageDocument` must be created and dropped
/// between two await points.
pub struct PageDocument {
    html: Html,
    base_url: Url,
}

impl PageDocument {
    /// Parses `body`, fetched from `page_url`
    ///
    /// # Example
    ///
    /// ```
    /// use docs_ripple::crawler::PageDocument;
    /// use url::Url;
    ///
    /// let page = Url::parse("https://example.com/api/index.htm").unwrap();
    /// let doc = PageDocument::parse("<html><head><title>API</title></head></html>", &page);
    /// assert_eq!(doc.title(), Some("API".to_string()));
    /// ```
    pub fn parse(body: &str, page_url: &Url) -> Self {
        let html = Html::parse_document(body);
        let base_url = document_base(&html, page_url);
        Self { html, base_url }
    }

    /// URL that relative links on this page resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// All nodes matching `selector`, in document order
    pub fn query<'a>(&'a self, selector: &RuleSelector) -> Vec<ElementRef<'a>> {
        self.html.select(selector.selector()).collect()
    }

    /// Text of the `<title>` element, if present and non-empty
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.html
            .select(&title_selector)
            .next()
            .map(|element| node_text(&element))
            .filter(|s| !s.is_empty())
    }
}

fn document_base(html: &Html, page_url: &Url) -> Url {
    let Ok(base_selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    html.select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| resolve_link(href, page_url).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Text content of a node with runs of whitespace collapsed to one space
pub fn node_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content of a node with inner formatting kept, ends trimmed
pub fn raw_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The `href` of a node, or of the first descendant carrying one
pub fn link_href<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().attr("href").or_else(|| {
        element
            .descendants()
            .filter_map(ElementRef::wrap)
            .find_map(|descendant| descendant.value().attr("href"))
    })
}

/// Text of the element right after the node's parent, when that element is a `<p>`
///
/// Documentation tables of constants put the name in a cell or `<div>` and
/// the description in the following paragraph.
pub fn following_paragraph_text(element: &ElementRef) -> String {
    element
        .parent()
        .and_then(|parent| parent.next_siblings().find_map(ElementRef::wrap))
        .filter(|next| next.value().name() == "p")
        .map(|paragraph| node_text(&paragraph))
        .unwrap_or_default()
}

/// Language named by a `language-*` or `lang-*` class on the node
pub fn language_class(element: &ElementRef) -> Option<String> {
    element.value().classes().find_map(|class| {
        class
            .strip_prefix("language-")
            .or_else(|| class.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}
