//! Rendering of a display window into a ratatui frame.
//!
//! Lit cells are drawn in the active colour. Unlit cells show a dim glyph,
//! like the unpowered segments of a real display.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::marquee::DisplayWindow;

/// Colours and glyph used for the segment cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyle {
    pub on: Color,
    pub off: Color,
    pub off_glyph: char,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            on: Color::Rgb(255, 0, 0),
            off: Color::Rgb(50, 0, 0),
            off_glyph: '~',
        }
    }
}

/// One span per cell, separated by single blanks.
pub fn cell_spans(window: &DisplayWindow, style: &SegmentStyle) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(window.cells().len() * 2);
    for (i, &c) in window.cells().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if window.is_lit(i) {
            spans.push(Span::styled(
                c.to_string(),
                Style::default().fg(style.on).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                style.off_glyph.to_string(),
                Style::default().fg(style.off),
            ));
        }
    }
    spans
}

/// Draw the display centered in `area`.
pub fn render_display(
    frame: &mut ratatui::Frame,
    window: &DisplayWindow,
    style: &SegmentStyle,
    area: Rect,
) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(Line::from(cell_spans(window, style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, row);
}
