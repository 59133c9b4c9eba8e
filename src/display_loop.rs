//! Fixed-rate control loop driving the display.
//!
//! Each tick the loop:
//! 1. polls the sink for a quit request,
//! 2. drains newly written log lines through the framer and title extractor,
//! 3. applies a finished title from the resolver, if any,
//! 4. draws one marquee window (or an idle frame) and presents it.
//!
//! The tick rate is the only timing source. File reads never wait for the
//! writer, so a title logged between two ticks is on screen by the second.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::framer::{FramerError, FramerEvent, RecordFramer};
use crate::marquee::{DisplayWindow, MarqueeState};
use crate::terminal::SegmentSink;
use crate::title::TitleExtractor;
use crate::transliterate::{ResolvedTitle, TitleResolver};

/// Upper bound on log lines consumed in one tick. Anything beyond is read
/// on the following ticks.
pub const MAX_LINES_PER_TICK: usize = 4096;

/// What the display is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No title seen since startup; idle frames are drawn.
    WaitingForRecord,
    /// A title is scrolling.
    HaveTitle {
        raw: String,
        rendered: Arc<str>,
        marquee: MarqueeState,
    },
}

/// Whether the loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Errors that end the loop.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error(transparent)]
    Stream(#[from] FramerError),
    #[error("display error: {0}")]
    Render(#[from] io::Error),
}

/// Owns the framer, the marquee state and the sink.
pub struct DisplayLoop<R, S, T> {
    framer: RecordFramer<R>,
    extractor: Box<dyn TitleExtractor>,
    resolver: T,
    sink: S,
    state: DisplayState,
    /// Raw title most recently handed to the resolver
    requested: Option<String>,
}

impl<R, S, T> DisplayLoop<R, S, T>
where
    R: BufRead,
    S: SegmentSink,
    T: TitleResolver,
{
    pub fn new(
        framer: RecordFramer<R>,
        extractor: Box<dyn TitleExtractor>,
        resolver: T,
        sink: S,
    ) -> Self {
        Self {
            framer,
            extractor,
            resolver,
            sink,
            state: DisplayState::WaitingForRecord,
            requested: None,
        }
    }

    /// Run one frame.
    pub fn tick(&mut self) -> Result<TickOutcome, LoopError> {
        if self.sink.poll_quit()? {
            return Ok(TickOutcome::Quit);
        }

        self.read_records()?;

        let window = match self.resolver.poll() {
            Some(resolved) => self.show(resolved),
            None => match &mut self.state {
                DisplayState::HaveTitle { marquee, .. } => marquee.advance(),
                DisplayState::WaitingForRecord => DisplayWindow::blank(),
            },
        };

        self.sink.draw(&window)?;
        self.sink.present()?;
        Ok(TickOutcome::Continue)
    }

    /// Tick at `fps` frames per second until quit or a fatal error. The sink
    /// is released either way.
    pub async fn run(&mut self, fps: u32) -> Result<(), LoopError> {
        let result = self.run_until_quit(fps).await;
        if let Err(e) = self.sink.release() {
            log::warn!("Failed to release display: {}", e);
        }
        result
    }

    async fn run_until_quit(&mut self, fps: u32) -> Result<(), LoopError> {
        let mut interval = tokio::time::interval(Duration::from_secs(1) / fps.max(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if self.tick()? == TickOutcome::Quit {
                log::info!("Quit requested");
                return Ok(());
            }
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn read_records(&mut self) -> Result<(), FramerError> {
        for _ in 0..MAX_LINES_PER_TICK {
            match self.framer.poll()? {
                FramerEvent::NoData => break,
                FramerEvent::Line => {}
                FramerEvent::Record(Some(message)) => self.handle_message(&message),
                FramerEvent::Record(None) => log::trace!("Record without message"),
            }
        }
        Ok(())
    }

    fn handle_message(&mut self, message: &str) {
        let Some(title) = self.extractor.extract_title(message) else {
            return;
        };
        if title.is_empty() || self.requested.as_deref() == Some(title.as_str()) {
            return;
        }

        log::info!("New title: {}", title);
        self.resolver.request(&title);
        self.requested = Some(title);
    }

    /// Switch to a newly resolved title, scrolling from the start.
    fn show(&mut self, resolved: ResolvedTitle) -> DisplayWindow {
        log::info!("Displaying {:?} as {:?}", resolved.raw, resolved.rendered);
        let mut marquee = MarqueeState::new(&resolved.rendered);
        let window = marquee.advance();
        self.state = DisplayState::HaveTitle {
            raw: resolved.raw,
            rendered: resolved.rendered,
            marquee,
        };
        window
    }
}
