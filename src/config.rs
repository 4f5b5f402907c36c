//! Configuration for pdfdeck.
//!
//! Holds the fixed size caps, the output location, and the toggles
//! that shape a merge session. The caps are deliberately constants
//! rather than configuration: they bound worst-case memory use of the
//! in-memory queue and are not meant to be raised at runtime.

use std::path::PathBuf;

use crate::error::{PdfDeckError, Result};

/// Per-file size cap: 50 MiB.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Aggregate size cap across all queued files: 100 MiB.
pub const MAX_TOTAL_SIZE: u64 = 100 * 1024 * 1024;

/// The only accepted declared MIME type.
pub const PDF_MIME: &str = "application/pdf";

/// Default output filename for the merged document.
pub const DEFAULT_OUTPUT: &str = "merged.pdf";

/// Factor applied to the total queued size when estimating the output
/// size with compaction enabled. Display-only; the real output size
/// depends on the documents' contents.
pub const COMPRESSION_ESTIMATE_FACTOR: f64 = 0.7;

/// Settings for a merge session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path the merged document is written to.
    pub output: PathBuf,

    /// Compact the output (object-stream compression) and scale the
    /// displayed size estimate accordingly.
    pub compress: bool,

    /// Suppress non-error output.
    pub quiet: bool,

    /// Show verbose output.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            compress: false,
            quiet: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the output path is empty or quiet and
    /// verbose are both set.
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(PdfDeckError::invalid_config("Output path is empty"));
        }

        if self.quiet && self.verbose {
            return Err(PdfDeckError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        Ok(())
    }
}
