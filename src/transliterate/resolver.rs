//! Hand-off of transliteration results to the display loop.
//!
//! The loop asks for a title with [`TitleResolver::request`] and picks the
//! result up with [`TitleResolver::poll`] at a tick boundary, so a title
//! change is applied between renders and never in the middle of one.

use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{TransliterationEngine, Transliterator};

/// A title ready for the marquee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    /// Title as extracted from the log.
    pub raw: String,
    /// Normalized, transliterated rendering.
    pub rendered: Arc<str>,
}

/// Source of display-ready titles for the control loop.
pub trait TitleResolver {
    /// Start resolving `raw_title`. Supersedes any request still in flight.
    fn request(&mut self, raw_title: &str);

    /// Take the most recent finished request, if any.
    fn poll(&mut self) -> Option<ResolvedTitle>;
}

/// Resolves on the calling thread; the result is ready at the next poll.
pub struct InlineResolver<E> {
    transliterator: Transliterator<E>,
    ready: Option<ResolvedTitle>,
}

impl<E: TransliterationEngine> InlineResolver<E> {
    pub fn new(transliterator: Transliterator<E>) -> Self {
        Self {
            transliterator,
            ready: None,
        }
    }
}

impl<E: TransliterationEngine> TitleResolver for InlineResolver<E> {
    fn request(&mut self, raw_title: &str) {
        let rendered = self.transliterator.transliterate(raw_title);
        self.ready = Some(ResolvedTitle {
            raw: raw_title.to_string(),
            rendered,
        });
    }

    fn poll(&mut self) -> Option<ResolvedTitle> {
        self.ready.take()
    }
}

/// Resolves on tokio's blocking pool so a slow engine never stalls a tick.
pub struct BackgroundResolver<E> {
    transliterator: Arc<Mutex<Transliterator<E>>>,
    handle: Handle,
    tx: mpsc::UnboundedSender<ResolvedTitle>,
    rx: mpsc::UnboundedReceiver<ResolvedTitle>,
    /// Raw title of the newest request not yet delivered.
    latest: Option<String>,
}

impl<E: TransliterationEngine + 'static> BackgroundResolver<E> {
    pub fn new(transliterator: Transliterator<E>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            transliterator: Arc::new(Mutex::new(transliterator)),
            handle,
            tx,
            rx,
            latest: None,
        }
    }

    /// Whether a requested title has not been delivered yet.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }
}

impl<E: TransliterationEngine + 'static> TitleResolver for BackgroundResolver<E> {
    fn request(&mut self, raw_title: &str) {
        self.latest = Some(raw_title.to_string());

        let transliterator = Arc::clone(&self.transliterator);
        let tx = self.tx.clone();
        let raw = raw_title.to_string();
        self.handle.spawn_blocking(move || {
            let rendered = {
                let mut guard = match transliterator.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.transliterate(&raw)
            };
            // Receiver only goes away when the loop has shut down.
            let _ = tx.send(ResolvedTitle { raw, rendered });
        });
    }

    fn poll(&mut self) -> Option<ResolvedTitle> {
        let mut delivered = None;
        while let Ok(resolved) = self.rx.try_recv() {
            if self.latest.as_deref() == Some(resolved.raw.as_str()) {
                delivered = Some(resolved);
            } else {
                log::debug!("Dropping superseded title {:?}", resolved.raw);
            }
        }
        if delivered.is_some() {
            self.latest = None;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transliterate::{IdentityEngine, TransliterationError};
    use std::time::Duration;

    struct SlowUpper(Duration);

    impl TransliterationEngine for SlowUpper {
        fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
            std::thread::sleep(self.0);
            Ok(text.to_uppercase())
        }
    }

    async fn wait_for<R: TitleResolver>(resolver: &mut R) -> ResolvedTitle {
        for _ in 0..500 {
            if let Some(resolved) = resolver.poll() {
                return resolved;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("resolver never delivered");
    }

    #[test]
    fn test_inline_resolver_delivers_once() {
        let mut resolver = InlineResolver::new(Transliterator::new(IdentityEngine));
        assert!(resolver.poll().is_none());

        resolver.request("☆a");
        let resolved = resolver.poll().unwrap();
        assert_eq!(resolved.raw, "☆a");
        assert_eq!(&*resolved.rendered, "*a");
        assert!(resolver.poll().is_none());
    }

    #[test]
    fn test_inline_resolver_keeps_latest_request() {
        let mut resolver = InlineResolver::new(Transliterator::new(IdentityEngine));
        resolver.request("first");
        resolver.request("second");
        assert_eq!(resolver.poll().unwrap().raw, "second");
    }

    #[tokio::test]
    async fn test_background_resolver_delivers() {
        let mut resolver = BackgroundResolver::new(
            Transliterator::new(SlowUpper(Duration::from_millis(20))),
            Handle::current(),
        );
        resolver.request("piano");
        assert!(resolver.is_pending());

        let resolved = wait_for(&mut resolver).await;
        assert_eq!(resolved.raw, "piano");
        assert_eq!(&*resolved.rendered, "PIANO");
        assert!(!resolver.is_pending());
    }

    #[tokio::test]
    async fn test_background_resolver_drops_superseded() {
        let mut resolver = BackgroundResolver::new(
            Transliterator::new(SlowUpper(Duration::from_millis(10))),
            Handle::current(),
        );
        resolver.request("old");
        resolver.request("new");

        let resolved = wait_for(&mut resolver).await;
        assert_eq!(resolved.raw, "new");

        // Give any straggler time to arrive, then make sure it is ignored.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(resolver.poll().is_none());
    }
}
