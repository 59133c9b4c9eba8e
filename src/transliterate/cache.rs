//! Memoization of transliterated titles.

use std::collections::HashMap;
use std::sync::Arc;

/// Transliterated titles keyed by the raw (pre-normalization) title.
///
/// Entries are never evicted or expired. Memory grows with the number of
/// distinct titles seen in a session, which stays small for one player's
/// play session but is unbounded in principle.
#[derive(Debug, Default, Clone)]
pub struct TitleCache {
    entries: HashMap<String, Arc<str>>,
}

impl TitleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached rendering for `raw_title`, sharing the stored value.
    pub fn get(&self, raw_title: &str) -> Option<Arc<str>> {
        self.entries.get(raw_title).cloned()
    }

    /// Store a rendering and return the shared handle to it.
    pub fn insert(&mut self, raw_title: &str, rendered: &str) -> Arc<str> {
        let value: Arc<str> = Arc::from(rendered);
        self.entries.insert(raw_title.to_string(), Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
