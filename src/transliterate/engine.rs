//! Transliteration engines.

use std::panic::{self, AssertUnwindSafe};

/// Errors from a transliteration engine.
#[derive(Debug, thiserror::Error)]
pub enum TransliterationError {
    #[error("transliteration engine panicked: {0}")]
    Panicked(String),
    #[error("transliteration failed: {0}")]
    Engine(String),
}

/// Converts normalized text to a Latin rendering.
pub trait TransliterationEngine: Send + Sync {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError>;
}

/// Hepburn romanization of hiragana, katakana and kanji via `kakasi`.
///
/// Text outside those scripts passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct KakasiEngine;

impl TransliterationEngine for KakasiEngine {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        panic::catch_unwind(AssertUnwindSafe(|| kakasi::convert(text).romaji)).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            TransliterationError::Panicked(message)
        })
    }
}

/// Engine that leaves text as it is, for running without romanization.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEngine;

impl TransliterationEngine for IdentityEngine {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        Ok(text.to_string())
    }
}

impl<E: TransliterationEngine + ?Sized> TransliterationEngine for Box<E> {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        (**self).transliterate(text)
    }
}
