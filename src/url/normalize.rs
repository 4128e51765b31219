use crate::config::UrlConfig;
use crate::UrlError;
use url::Url;

/// Canonicalizes an absolute URL for deduplication
///
/// # Normalization Steps
///
/// 1. Remove the fragment unless the policy keeps fragments
/// 2. Remove an empty query string (trailing `?`)
///
/// Scheme and host case, default ports and dot segments are already
/// normalized by the URL parser.
///
/// # Examples
///
/// ```
/// use docs_ripple::config::UrlConfig;
/// use docs_ripple::url::canonicalize;
/// use url::Url;
///
/// let url = Url::parse("https://Help.Example.com/api/IFoo.htm#Pg0").unwrap();
/// let canonical = canonicalize(url, &UrlConfig::default());
/// assert_eq!(canonical.as_str(), "https://help.example.com/api/IFoo.htm");
/// ```
pub fn canonicalize(mut url: Url, policy: &UrlConfig) -> Url {
    if !policy.keep_fragments {
        url.set_fragment(None);
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    url
}

/// Parses and canonicalizes a seed URL
///
/// # Errors
///
/// * `UrlError::Parse` - not an absolute URL
/// * `UrlError::InvalidScheme` - not HTTP or HTTPS
/// * `UrlError::MissingHost` - no host component
pub fn parse_seed(seed: &str, policy: &UrlConfig) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(canonicalize(url, policy))
}
