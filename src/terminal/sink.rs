//! The drawing surface the display loop renders into.

use std::io;

use crate::marquee::DisplayWindow;

/// A 9-cell segment display.
///
/// Each frame the loop calls [`draw`](SegmentSink::draw) once, then
/// [`present`](SegmentSink::present), then polls for quit.
pub trait SegmentSink {
    /// Stage the cells for the next frame.
    fn draw(&mut self, window: &DisplayWindow) -> io::Result<()>;

    /// Show the staged frame.
    fn present(&mut self) -> io::Result<()>;

    /// Whether the user asked to quit since the last poll. Never blocks.
    fn poll_quit(&mut self) -> io::Result<bool>;

    /// Give the display resources back. Safe to call more than once.
    fn release(&mut self) -> io::Result<()>;
}
