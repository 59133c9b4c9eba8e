//! Romanization of normalized titles, memoized per raw title.

mod cache;
mod engine;
mod resolver;

pub use cache::TitleCache;
pub use engine::{IdentityEngine, KakasiEngine, TransliterationEngine, TransliterationError};
pub use resolver::{BackgroundResolver, InlineResolver, ResolvedTitle, TitleResolver};

use std::sync::Arc;

use crate::normalize::normalize;

/// Normalizes and transliterates titles, caching results by raw title.
pub struct Transliterator<E> {
    engine: E,
    cache: TitleCache,
}

impl<E: TransliterationEngine> Transliterator<E> {
    /// Create a transliterator with an empty cache.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cache: TitleCache::new(),
        }
    }

    /// Render `raw_title` for the display.
    ///
    /// Engine failures are logged and the normalized text is returned
    /// instead. Fallback results are not cached, so the engine is tried
    /// again the next time the title is seen.
    pub fn transliterate(&mut self, raw_title: &str) -> Arc<str> {
        if let Some(hit) = self.cache.get(raw_title) {
            return hit;
        }

        let normalized = normalize(raw_title);
        match self.engine.transliterate(&normalized) {
            Ok(rendered) => self.cache.insert(raw_title, &rendered),
            Err(e) => {
                log::error!("Error transliterating title {:?}: {}", raw_title, e);
                Arc::from(normalized)
            }
        }
    }

    pub fn cache(&self) -> &TitleCache {
        &self.cache
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine that uppercases and counts its calls.
    #[derive(Default)]
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl TransliterationEngine for CountingEngine {
        fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_uppercase())
        }
    }

    struct FailingEngine;

    impl TransliterationEngine for FailingEngine {
        fn transliterate(&self, _text: &str) -> Result<String, TransliterationError> {
            Err(TransliterationError::Engine("dictionary missing".to_string()))
        }
    }

    #[test]
    fn test_cache_hit_returns_same_value_and_skips_engine() {
        let mut t = Transliterator::new(CountingEngine::default());
        let first = t.transliterate("☆piano");
        let second = t.transliterate("☆piano");

        assert_eq!(&*first, "*PIANO");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(t.engine().calls.load(Ordering::SeqCst), 1);
        assert_eq!(t.cache().len(), 1);
    }

    #[test]
    fn test_distinct_titles_each_call_engine() {
        let mut t = Transliterator::new(CountingEngine::default());
        t.transliterate("a");
        t.transliterate("b");
        t.transliterate("a");
        assert_eq!(t.engine().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_engine_failure_falls_back_to_normalized() {
        let mut t = Transliterator::new(FailingEngine);
        assert_eq!(&*t.transliterate("I♥U!?"), "I<3U! ");
        assert!(t.cache().is_empty());
    }
}
