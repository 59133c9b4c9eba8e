//! Simulated segment display drawn in the terminal.

mod raw_mode;
mod rendering;
mod sink;
mod tui;

pub use raw_mode::{TERMINAL_ACTIVE, install_panic_hook};
pub use rendering::{SegmentStyle, cell_spans, render_display};
pub use sink::SegmentSink;
pub use tui::TerminalSink;
