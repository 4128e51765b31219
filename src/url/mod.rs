//! URL handling module for Docs-Ripple
//!
//! Every URL passes through this module before it reaches the visited
//! registry: links are resolved against the page they were found on, then
//! canonicalized according to the configured fragment policy.

mod normalize;
mod resolve;

pub use normalize::{canonicalize, parse_seed};
pub use resolve::resolve_link;

use crate::config::UrlConfig;
use crate::UrlError;
use url::Url;

/// Resolves an href found on a page and canonicalizes the result
///
/// # Examples
///
/// ```
/// use docs_ripple::config::UrlConfig;
/// use docs_ripple::url::resolve_canonical;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/api/index.htm").unwrap();
/// let url = resolve_canonical("IFoo.htm#Pg0", &base, &UrlConfig::default()).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/api/IFoo.htm");
/// ```
pub fn resolve_canonical(href: &str, base_url: &Url, policy: &UrlConfig) -> Result<Url, UrlError> {
    resolve_link(href, base_url).map(|url| canonicalize(url, policy))
}
