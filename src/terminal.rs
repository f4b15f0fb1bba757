use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use tracing::{error, warn};

/// Puts the terminal into raw mode with a hidden cursor and puts it back the
/// way it was exactly once, either on [`TerminalGuard::restore()`] or on drop.
///
/// Failures are logged and otherwise ignored: the game still runs on a
/// terminal that is left line-buffered.
#[derive(Debug)]
pub(crate) struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub(crate) fn setup() -> TerminalGuard {
        if let Err(e) = enable_raw_mode() {
            error!(error = %e, "Failed to put terminal into raw mode; input will be line-buffered");
        }
        if let Err(e) = execute!(io::stdout(), Hide) {
            warn!(error = %e, "Failed to hide cursor");
        }
        TerminalGuard { active: true }
    }

    /// Put the terminal back.  Returns `false` without touching the terminal
    /// if it has already been restored.
    pub(crate) fn restore(&mut self) -> bool {
        if !std::mem::replace(&mut self.active, false) {
            return false;
        }
        if let Err(e) = disable_raw_mode() {
            error!(error = %e, "Failed to restore terminal mode");
        }
        if let Err(e) = execute!(io::stdout(), ResetColor, Show) {
            warn!(error = %e, "Failed to show cursor");
        }
        true
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_only_once() {
        let mut guard = TerminalGuard { active: true };
        assert!(guard.restore());
        assert!(!guard.active);
        assert!(!guard.restore());
        drop(guard);
    }
}
