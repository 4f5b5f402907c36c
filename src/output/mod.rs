//! User-facing output for pdfdeck.
//!
//! The session reports what happened through [`Notice`] values; this
//! module turns them into terminal output:
//! - Leveled status messages (info, success, warning, error)
//! - Progress counters for validation and merging
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```
//! use pdfdeck::output::{Notice, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.show(&Notice::success("Merge completed"));
//! formatter.show(&Notice::error("doc.txt is not a PDF file"));
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{NoticeLevel, OutputFormatter};
pub use progress::ProgressCounter;

use serde::Serialize;

/// One user-facing message produced by a session operation.
///
/// Notices are the terminal rendition of browser toasts: each queue
/// mutation or merge attempt yields zero or more of them, already
/// phrased for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity of the message.
    pub level: NoticeLevel,
    /// Display text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this notice reports a failure.
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
