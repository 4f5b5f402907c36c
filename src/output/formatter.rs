//! Notice formatting and display.
//!
//! This module renders session notices to the terminal with support
//! for quiet and verbose modes.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::output::formatter::OutputFormatter;
//! use pdfdeck::output::Notice;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.show(&Notice::info("3 file(s) queued"));
//! formatter.show(&Notice::error("Merge failed"));
//! ```

use crate::config::Config;
use crate::output::Notice;
use serde::Serialize;
use std::io::{self, Write};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

/// Notice renderer with configurable verbosity.
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Detect if colored output should be used.
    ///
    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Display one notice with level-appropriate formatting.
    ///
    /// Info and success notices are suppressed in quiet mode;
    /// warnings and errors are always shown.
    pub fn show(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success if self.quiet => {}
            level => self.print_message(level, &notice.message),
        }
    }

    /// Display a batch of notices in order.
    pub fn show_all(&self, notices: &[Notice]) {
        for notice in notices {
            self.show(notice);
        }
    }

    /// Print a debug/verbose message.
    ///
    /// Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            let prefix = if self.colored {
                "\x1b[36m→ "
            } else {
                "→ "
            };
            let reset = if self.colored { "\x1b[0m" } else { "" };
            println!("{prefix}{message}{reset}");
        }
    }

    fn print_message(&self, level: NoticeLevel, message: &str) {
        let (prefix, color_code) = match level {
            NoticeLevel::Info => ("", ""),
            NoticeLevel::Success => ("✓ ", "\x1b[32m"), // Green
            NoticeLevel::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            NoticeLevel::Error => ("✗ ", "\x1b[31m"),   // Red
        };

        let reset = "\x1b[0m";

        if self.colored && !color_code.is_empty() {
            println!("{color_code}{prefix}{message}{reset}");
        } else {
            println!("{prefix}{message}");
        }
    }

    /// Print a progress indicator.
    ///
    /// Suppressed in quiet mode.
    pub fn progress(&self, current: usize, total: usize, message: Option<&str>) {
        if !self.quiet {
            let msg = message.unwrap_or("");
            print!("\r  [{current}/{total}] {msg}");
            io::stdout().flush().ok();

            if current == total {
                println!();
            }
        }
    }

    /// Print a list item.
    ///
    /// Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print a blank line.
    ///
    /// Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
