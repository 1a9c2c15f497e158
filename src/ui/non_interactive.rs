//! Plain UI for CI/headless environments and pipes.

use super::{OutputMode, UserInterface};

/// UI implementation without colors or cursor control.
///
/// Results go to stdout; warnings and errors go to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_decoration() {
            println!("\n{}\n", title);
        }
    }

    fn show_detail(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            println!("  {}: {}", key, value);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_decoration() {
            println!("\n  {}", hint);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
