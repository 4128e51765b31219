use crate::UrlError;
use url::Url;

/// Resolves a link href against the page's base URL
///
/// Returns an error (and the link should be dropped) when:
/// - the href is empty
/// - the href only names a fragment of the current page
/// - the href uses a `javascript:`, `mailto:`, `tel:` or `data:` scheme
/// - the href cannot be joined onto the base URL
/// - the resolved URL is not HTTP(S)
///
/// # Examples
///
/// ```
/// use docs_ripple::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://help.example.com/api/index.htm").unwrap();
/// let link = resolve_link("/api/IFoo.htm", &base).unwrap();
/// assert_eq!(link.as_str(), "https://help.example.com/api/IFoo.htm");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Result<Url, UrlError> {
    let href = href.trim();

    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    if href.starts_with('#') {
        return Err(UrlError::FragmentOnly(href.to_string()));
    }

    let lower = href.to_ascii_lowercase();
    for scheme in ["javascript:", "mailto:", "tel:", "data:"] {
        if lower.starts_with(scheme) {
            return Err(UrlError::InvalidScheme(scheme.trim_end_matches(':').to_string()));
        }
    }

    let resolved = base_url
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }

    if resolved.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(resolved)
}
