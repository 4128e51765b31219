//! Visited registry: the single source of dedup truth

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Set of canonical URLs already scheduled for a fetch
///
/// URLs must be canonicalized before they reach the registry; it compares
/// the serialized URL verbatim.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    visited: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` visited, returning true only for the first caller
    ///
    /// The check and the mark happen under one lock, so concurrent callers
    /// for the same URL never both see `true`.
    pub fn try_visit(&self, url: &Url) -> bool {
        self.lock().insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.lock().contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets every visited URL
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked mid-insert
        self.visited.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
