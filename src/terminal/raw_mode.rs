//! Panic-safe terminal restoration.

use crossterm::terminal::disable_raw_mode;
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the display owns the terminal (raw mode + alternate screen).
pub static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install a panic hook that gives the terminal back before the panic
/// message is printed, so the message is readable.
pub fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(
                io::stdout(),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::cursor::Show,
            );
            let _ = disable_raw_mode();
        }

        original_hook(panic_info);
    }));
}
