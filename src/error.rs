//! Error types for pdfdeck.
//!
//! All fallible operations in the crate return [`PdfDeckError`]. The
//! variants fall into three groups, mirroring how failures surface to
//! the user:
//!
//! - **Validation errors**: a candidate file was rejected before it
//!   ever reached the queue (wrong type, over a size cap, corrupt).
//! - **Index errors**: a queue operation was given an out-of-range
//!   index. UI-driven indices should make these unreachable.
//! - **Merge errors**: the merge was refused (too few files) or the
//!   underlying PDF library failed mid-merge.
//!
//! Every error is recoverable: the session stays interactive after
//! surfacing any of them.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// Candidate file's declared MIME type is not `application/pdf`.
    #[error("{name} is not a PDF file (declared type: {declared})")]
    WrongType {
        /// Name of the rejected file.
        name: String,
        /// The MIME type the file declared.
        declared: String,
    },

    /// Candidate file exceeds the per-file size cap.
    #[error("{name} exceeds the {} per-file limit ({size} bytes)", format_limit(*.limit))]
    FileTooLarge {
        /// Name of the rejected file.
        name: String,
        /// Declared size of the file in bytes.
        size: u64,
        /// The per-file cap in bytes.
        limit: u64,
    },

    /// Accepting the candidate would push the queue over the aggregate cap.
    #[error("Total file size exceeds the {} limit (would be {would_be} bytes)", format_limit(*.limit))]
    AggregateTooLarge {
        /// Total size the queue would reach, in bytes.
        would_be: u64,
        /// The aggregate cap in bytes.
        limit: u64,
    },

    /// Candidate file failed the structural parse probe.
    #[error("{name} appears to be corrupted or invalid: {details}")]
    CorruptPdf {
        /// Name of the rejected file.
        name: String,
        /// Details from the PDF parser.
        details: String,
    },

    /// A queue index was out of range.
    #[error("Index {index} out of range for queue of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Queue length at the time of the operation.
        len: usize,
    },

    /// Merge requested with fewer than two queued files.
    #[error("At least two PDFs are required to merge ({queued} queued)")]
    InsufficientFiles {
        /// Number of files currently queued.
        queued: usize,
    },

    /// The PDF library failed during merge or serialization.
    #[error("Error merging PDFs: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

/// Render a byte cap as a round MiB figure for user-facing messages.
fn format_limit(limit: u64) -> String {
    format!("{}MB", limit / (1024 * 1024))
}

impl From<lopdf::Error> for PdfDeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl PdfDeckError {
    /// Create a WrongType error.
    pub fn wrong_type(name: impl Into<String>, declared: impl Into<String>) -> Self {
        Self::WrongType {
            name: name.into(),
            declared: declared.into(),
        }
    }

    /// Create a FileTooLarge error.
    pub fn file_too_large(name: impl Into<String>, size: u64, limit: u64) -> Self {
        Self::FileTooLarge {
            name: name.into(),
            size,
            limit,
        }
    }

    /// Create an AggregateTooLarge error.
    pub fn aggregate_too_large(would_be: u64, limit: u64) -> Self {
        Self::AggregateTooLarge { would_be, limit }
    }

    /// Create a CorruptPdf error.
    pub fn corrupt_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an InsufficientFiles error.
    pub fn insufficient_files(queued: usize) -> Self {
        Self::InsufficientFiles { queued }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is a validation rejection.
    ///
    /// Validation rejections are per-file outcomes that never abort a
    /// batch (except AggregateTooLarge, which terminates it).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::WrongType { .. }
                | Self::FileTooLarge { .. }
                | Self::AggregateTooLarge { .. }
                | Self::CorruptPdf { .. }
        )
    }

    /// Get the exit code for this error.
    ///
    /// Used by the CLI when a startup-time error is fatal.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::WrongType { .. } => 2,
            Self::FileTooLarge { .. } => 2,
            Self::AggregateTooLarge { .. } => 2,
            Self::CorruptPdf { .. } => 3,
            Self::IndexOutOfRange { .. } => 1,
            Self::InsufficientFiles { .. } => 1,
            Self::MergeFailed { .. } => 6,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
