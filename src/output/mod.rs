//! Output formatting module

pub mod json;
pub mod progress;
pub mod styles;

use std::sync::Mutex;

use console::Term;
use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

use crate::application::ports::ProgressReporter;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// `ProgressReporter` backed by the terminal: spinner per step on a TTY,
/// plain context lines otherwise.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    current: Mutex<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            current: Mutex::new(None),
        }
    }

    fn take_current(&self) -> Option<ProgressBar> {
        self.current.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if let Some(pb) = self.take_current() {
            pb.finish_and_clear();
        }
        if self.ctx.show_progress() {
            let pb = progress::spinner(message);
            if let Ok(mut guard) = self.current.lock() {
                *guard = Some(pb);
            }
        } else {
            self.ctx.info(message);
        }
    }

    fn success(&self, message: &str) {
        if let Some(pb) = self.take_current() {
            progress::finish_ok(&pb, message);
        } else {
            self.ctx.success(message);
        }
    }

    fn warn(&self, message: &str) {
        if let Some(pb) = self.take_current() {
            pb.finish_and_clear();
        }
        self.ctx.warn(message);
    }
}
