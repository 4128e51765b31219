//! Record and link extraction for one page

use super::parser::{
    following_paragraph_text, language_class, link_href, node_text, raw_text, PageDocument,
};
use crate::config::UrlConfig;
use crate::output::{
    CodeExampleRecord, ConstantRecord, LinkRecord, PageDetailRecord, RecordKind, ScrapedRecord,
};
use crate::strategy::{DetailSelectors, ExtractionRule, RuleSelector};
use crate::url::resolve_canonical;
use scraper::ElementRef;
use url::Url;

/// Everything a page yielded
#[derive(Debug, Default)]
pub struct PageExtraction {
    /// Records in document order
    pub records: Vec<ScrapedRecord>,

    /// Canonical URLs to follow, in document order (not deduplicated)
    pub links: Vec<Url>,

    /// Hrefs that were missing or could not be resolved
    pub links_dropped: usize,
}

/// Applies `rule` to a parsed page
///
/// Data nodes are processed before link nodes. `page_url` is the task URL
/// and becomes the `sourceUrl`/`parentUrl` of every record. Links are only
/// collected when `follow_links` is set.
pub fn extract_page(
    document: &PageDocument,
    page_url: &Url,
    rule: &ExtractionRule,
    follow_links: bool,
    policy: &UrlConfig,
) -> PageExtraction {
    let mut extraction = PageExtraction::default();

    if let Some(selector) = &rule.data_selector {
        extract_records(document, page_url, rule, selector, policy, &mut extraction);
    }

    if follow_links {
        if let Some(selector) = &rule.link_selector {
            extract_links(document, page_url, selector, policy, &mut extraction);
        }
    }

    extraction
}

fn extract_records(
    document: &PageDocument,
    page_url: &Url,
    rule: &ExtractionRule,
    selector: &RuleSelector,
    policy: &UrlConfig,
    extraction: &mut PageExtraction,
) {
    let source_url = page_url.to_string();
    let nodes = document.query(selector);
    let title = match rule.record {
        RecordKind::CodeExample => document.title().unwrap_or_default(),
        _ => String::new(),
    };

    for node in nodes {
        let record = match rule.record {
            RecordKind::Constant => {
                let record = ConstantRecord {
                    name: node_text(&node),
                    description: following_paragraph_text(&node),
                    source_url: source_url.clone(),
                };
                tracing::debug!("Collected: {} - {}", record.name, record.description);
                ScrapedRecord::Constant(record)
            }
            RecordKind::Link => {
                let target = link_href(&node)
                    .and_then(|href| resolve_canonical(href, document.base_url(), policy).ok());
                let Some(target) = target else {
                    extraction.links_dropped += 1;
                    continue;
                };
                ScrapedRecord::Link(LinkRecord {
                    title: node_text(&node),
                    target_url: target.to_string(),
                    parent_url: source_url.clone(),
                })
            }
            RecordKind::CodeExample => ScrapedRecord::CodeExample(CodeExampleRecord {
                title: title.clone(),
                snippet: raw_text(&node),
                language: language_class(&node)
                    .or_else(|| rule.language.clone())
                    .unwrap_or_else(|| "text".to_string()),
                source_url: source_url.clone(),
            }),
            RecordKind::PageDetail => {
                ScrapedRecord::PageDetail(page_detail(&node, rule.detail.as_ref(), &source_url))
            }
        };
        extraction.records.push(record);
    }
}

fn page_detail(
    node: &ElementRef,
    detail: Option<&DetailSelectors>,
    source_url: &str,
) -> PageDetailRecord {
    let texts = |selector: Option<&RuleSelector>| -> Vec<String> {
        let Some(selector) = selector else {
            return Vec::new();
        };
        node.select(selector.selector())
            .map(|element| node_text(&element))
            .filter(|text| !text.is_empty())
            .collect()
    };

    PageDetailRecord {
        source_url: source_url.to_string(),
        remarks: texts(detail.and_then(|d| d.remarks.as_ref())).join("\n"),
        accessors: texts(detail.and_then(|d| d.accessors.as_ref())),
        examples: texts(detail.and_then(|d| d.examples.as_ref())),
        see_also: texts(detail.and_then(|d| d.see_also.as_ref())),
    }
}

fn extract_links(
    document: &PageDocument,
    page_url: &Url,
    selector: &RuleSelector,
    policy: &UrlConfig,
    extraction: &mut PageExtraction,
) {
    for node in document.query(selector) {
        let Some(href) = link_href(&node) else {
            extraction.links_dropped += 1;
            continue;
        };

        match resolve_canonical(href, document.base_url(), policy) {
            Ok(url) => extraction.links.push(url),
            Err(e) => {
                tracing::debug!("Dropping link {:?} on {}: {}", href, page_url, e);
                extraction.links_dropped += 1;
            }
        }
    }
}
