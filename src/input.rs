//! Quit signals from outside the terminal.
//!
//! In raw mode `Ctrl+C` arrives as a key event, but SIGINT/SIGTERM sent by
//! another process still need handling. The handler only sets a flag; the
//! display loop picks it up at its next tick.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIT_SIGNALLED: AtomicBool = AtomicBool::new(false);

/// Install the SIGINT/SIGTERM handler.
pub fn setup_signal_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        QUIT_SIGNALLED.store(true, Ordering::SeqCst);
    })
}

/// Whether a quit signal has been received.
pub fn quit_requested() -> bool {
    QUIT_SIGNALLED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_quit_without_signal() {
        assert!(!quit_requested());
    }
}
