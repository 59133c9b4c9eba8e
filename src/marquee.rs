//! Looping horizontal scroll for the segment display.
//!
//! A [`MarqueeState`] is the padded source text plus a scroll offset.
//! [`MarqueeState::tick`] is a pure transition from one state to the next,
//! yielding the window to draw; the display loop calls it once per frame.

use std::sync::Arc;

/// Number of cells on the display.
pub const DISPLAY_LENGTH: usize = 9;

/// Blank cells shown before the text in each scroll period.
const LEAD_GAP: usize = 2;
/// Blank cells shown after the text in each scroll period.
const TRAIL_GAP: usize = 5;
/// Copies of the period kept in the buffer so a window never runs off its end.
const REPEATS: usize = 3;

/// One frame of display content: exactly [`DISPLAY_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayWindow {
    cells: [char; DISPLAY_LENGTH],
}

impl DisplayWindow {
    /// A window with every cell unlit.
    pub fn blank() -> Self {
        Self {
            cells: [' '; DISPLAY_LENGTH],
        }
    }

    /// Build a window from the first [`DISPLAY_LENGTH`] characters of `text`,
    /// padding with blanks on the right.
    pub fn from_text(text: &str) -> Self {
        let mut window = Self::blank();
        for (cell, c) in window.cells.iter_mut().zip(text.chars()) {
            *cell = c;
        }
        window
    }

    pub fn cells(&self) -> &[char; DISPLAY_LENGTH] {
        &self.cells
    }

    /// Whether the cell shows a glyph (anything but whitespace).
    pub fn is_lit(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|c| !c.is_whitespace())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_whitespace())
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::blank()
    }
}

impl std::fmt::Display for DisplayWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Scroll state for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeState {
    buffer: Arc<[char]>,
    period: usize,
    offset: usize,
}

impl MarqueeState {
    /// Start scrolling `text` from offset 0.
    pub fn new(text: &str) -> Self {
        let mut chars: Vec<char> = text.chars().collect();
        if chars.len() < DISPLAY_LENGTH {
            chars = center_pad(&chars, DISPLAY_LENGTH);
        }

        let mut period = vec![' '; LEAD_GAP];
        period.extend_from_slice(&chars);
        period.extend(std::iter::repeat_n(' ', TRAIL_GAP));

        let buffer: Vec<char> = period.repeat(REPEATS);
        Self {
            period: period.len(),
            buffer: buffer.into(),
            offset: 0,
        }
    }

    /// Ticks before the scroll repeats.
    pub fn period(&self) -> usize {
        self.period
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Window at the current offset.
    pub fn window(&self) -> DisplayWindow {
        let mut cells = [' '; DISPLAY_LENGTH];
        cells.copy_from_slice(&self.buffer[self.offset..self.offset + DISPLAY_LENGTH]);
        DisplayWindow { cells }
    }

    /// Emit the current window and move one cell to the left.
    pub fn tick(self) -> (Self, DisplayWindow) {
        let window = self.window();
        let offset = (self.offset + 1) % self.period;
        (Self { offset, ..self }, window)
    }

    /// In-place form of [`MarqueeState::tick`].
    pub fn advance(&mut self) -> DisplayWindow {
        let window = self.window();
        self.offset = (self.offset + 1) % self.period;
        window
    }
}

impl Iterator for MarqueeState {
    type Item = DisplayWindow;

    fn next(&mut self) -> Option<DisplayWindow> {
        Some(self.advance())
    }
}

/// Center `chars` in `width` cells. With an odd margin on an odd width the
/// extra blank goes on the left.
fn center_pad(chars: &[char], width: usize) -> Vec<char> {
    let margin = width.saturating_sub(chars.len());
    let left = margin / 2 + (margin & width & 1);
    let mut padded = vec![' '; left];
    padded.extend_from_slice(chars);
    padded.resize(chars.len() + margin, ' ');
    padded
}
