//! Terminal-backed segment display.
//!
//! Owns the terminal for the lifetime of the display: raw mode, alternate
//! screen and hidden cursor on creation, all restored on release or drop.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::raw_mode::{TERMINAL_ACTIVE, install_panic_hook};
use super::rendering::{SegmentStyle, render_display};
use super::sink::SegmentSink;
use crate::input::quit_requested;
use crate::marquee::DisplayWindow;

/// Segment display rendered with ratatui on a crossterm backend.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    style: SegmentStyle,
    staged: DisplayWindow,
    /// Whether this sink still has to restore the terminal
    active: bool,
}

impl TerminalSink {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Fails when stdout is not a usable terminal.
    pub fn new(style: SegmentStyle) -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
            abandon_raw_mode();
            return Err(e);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen);
                abandon_raw_mode();
                return Err(e);
            }
        };
        let mut sink = Self {
            terminal,
            style,
            staged: DisplayWindow::blank(),
            active: true,
        };
        sink.terminal.hide_cursor()?;
        sink.terminal.clear()?;
        Ok(sink)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl SegmentSink for TerminalSink {
    fn draw(&mut self, window: &DisplayWindow) -> io::Result<()> {
        self.staged = window.clone();
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let window = &self.staged;
        let style = &self.style;
        self.terminal.draw(|frame| {
            let area = frame.area();
            render_display(frame, window, style, area);
        })?;
        Ok(())
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        let mut quit = quit_requested();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= is_quit_key(key);
            }
        }
        Ok(quit)
    }

    fn release(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            TERMINAL_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            )?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            TERMINAL_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup - ignore errors during drop
            let _ = crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            );
            let _ = disable_raw_mode();
            let _ = self.terminal.show_cursor();
        }
    }
}

fn abandon_raw_mode() {
    TERMINAL_ACTIVE.store(false, Ordering::SeqCst);
    let _ = disable_raw_mode();
}

/// Keys that close the display: `q`, `Esc`, and `Ctrl+C` (raw mode swallows
/// the signal, so it arrives as a key).
pub fn is_quit_key(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
