//! Shared helpers for integration tests: a game-log writer and a sink that
//! records what would have been shown.

#![allow(dead_code)]

use encoding_rs::SHIFT_JIS;
use seg_marquee::marquee::DisplayWindow;
use seg_marquee::terminal::SegmentSink;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// One beatoraja-style XML log record carrying `message`.
pub fn record(message: &str) -> String {
    format!(
        "<record>\n  <date>2024-05-01T21:00:00</date>\n  <level>INFO</level>\n  <message>{}</message>\n</record>\n",
        message
    )
}

/// Append `text` to the log as Shift_JIS.
pub fn append(path: &Path, text: &str) {
    let (bytes, _, _) = SHIFT_JIS.encode(text);
    append_bytes(path, &bytes);
}

pub fn append_bytes(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
}

/// Sink that keeps every presented frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<String>,
    staged: Option<DisplayWindow>,
    /// Report quit once this many frames have been presented.
    pub quit_after: Option<usize>,
    pub releases: usize,
}

impl RecordingSink {
    pub fn quitting_after(frames: usize) -> Self {
        Self {
            quit_after: Some(frames),
            ..Self::default()
        }
    }

    pub fn last(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }
}

impl SegmentSink for RecordingSink {
    fn draw(&mut self, window: &DisplayWindow) -> io::Result<()> {
        self.staged = Some(window.clone());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let window = self.staged.take().expect("present without draw");
        self.frames.push(window.to_string());
        Ok(())
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        Ok(self.quit_after.is_some_and(|n| self.frames.len() >= n))
    }

    fn release(&mut self) -> io::Result<()> {
        self.releases += 1;
        Ok(())
    }
}
