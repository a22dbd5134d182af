//! Terminal output: styling, status lines, spinners.

pub mod progress;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
}

impl OutputContext {
    /// Detect TTY and color support from the environment.
    #[must_use]
    pub fn new() -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, is_tty }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty
    }

    /// Print a success message prefixed with `✓`.
    pub fn success(&self, msg: &str) {
        println!("  {} {msg}", "✓".style(self.styles.success));
    }

    /// Print an error message prefixed with `✗` to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`.
    pub fn info(&self, msg: &str) {
        println!("  {} {msg}", "ℹ".style(self.styles.info));
    }

    /// Print a key-value pair with the key dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {}  {value}", key.style(self.styles.dim));
    }
}

impl Default for OutputContext {
    fn default() -> Self {
        Self::new()
    }
}
