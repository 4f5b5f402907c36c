//! Writing the merged document to disk.
//!
//! Writes are atomic by default: bytes go to a sibling temp file that
//! is renamed over the target, so a failed write never leaves a
//! truncated `merged.pdf` behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{PdfDeckError, Result};

/// Options for writing the output file.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temp file first, then rename.
    pub atomic: bool,

    /// Buffer size for writing, in bytes.
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Writer for the serialized merge output.
#[derive(Debug, Default)]
pub struct OutputWriter {
    options: WriteOptions,
}

impl OutputWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write the serialized document to `path`.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub async fn save_bytes(&self, bytes: Vec<u8>, path: &Path) -> Result<u64> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || write_bytes(&bytes, &path_buf, &options))
            .await
            .map_err(|e| PdfDeckError::other(format!("Write task failed: {e}")))?
    }
}

fn write_bytes(bytes: &[u8], path: &PathBuf, options: &WriteOptions) -> Result<u64> {
    let write_path = if options.atomic {
        path.with_extension("tmp")
    } else {
        path.clone()
    };

    let file =
        std::fs::File::create(&write_path).map_err(|e| PdfDeckError::FailedToCreateOutput {
            path: write_path.clone(),
            source: e,
        })?;

    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| PdfDeckError::FailedToWrite {
            path: write_path.clone(),
            source: e,
        })?;

    if options.atomic {
        std::fs::rename(&write_path, path).map_err(|e| PdfDeckError::FailedToWrite {
            path: path.clone(),
            source: e,
        })?;
    }

    Ok(bytes.len() as u64)
}
