//! Candidate screening before files enter the queue.
//!
//! Screening is two-phase: cheap synchronous checks on declared
//! metadata first (MIME type, per-file cap, aggregate cap), then an
//! asynchronous structural probe that reads the candidate's bytes and
//! parses them with `lopdf` as a validity oracle. The probe only runs
//! when the cheap checks pass, so oversized or mistyped files never
//! cost a parse.
//!
//! Screening is pure with respect to the queue: it never enqueues and
//! never notifies. The session owns both of those side effects.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::config::{MAX_FILE_SIZE, MAX_TOTAL_SIZE, PDF_MIME};
use crate::error::{PdfDeckError, Result};

/// Where a candidate's bytes come from.
///
/// Content is read lazily: cheap checks work from declared metadata
/// and only the structural probe pulls the bytes in.
#[derive(Debug, Clone)]
pub enum ByteSource {
    /// Bytes already in memory (tests, non-filesystem surfaces).
    Memory(Vec<u8>),
    /// Bytes read from a file on demand.
    Path(PathBuf),
}

impl ByteSource {
    /// Read the full content.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match self {
            Self::Memory(bytes) => Ok(bytes.clone()),
            Self::Path(path) => tokio::fs::read(path).await,
        }
    }
}

/// A user-supplied file awaiting screening.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Display name of the file.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Content accessor.
    pub source: ByteSource,
}

impl FileCandidate {
    /// Build a candidate from a filesystem path.
    ///
    /// Size comes from file metadata and the MIME type is guessed
    /// from the extension, standing in for the declared type a
    /// browser-style surface would supply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self {
            name,
            mime,
            size: metadata.len(),
            source: ByteSource::Path(path.to_path_buf()),
        })
    }

    /// Build a candidate from in-memory bytes.
    pub fn in_memory(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            source: ByteSource::Memory(bytes),
        }
    }
}

/// Outcome of screening one candidate.
#[derive(Debug)]
pub struct ScreenOutcome {
    /// Candidate name, for reporting.
    pub name: String,
    /// Declared size, for aggregate accounting.
    pub size: u64,
    /// The probed bytes on acceptance, or the rejection.
    pub result: Result<Vec<u8>>,
}

/// Screens candidates against size caps and a structural parse probe.
#[derive(Debug, Clone)]
pub struct Validator {
    max_file_size: u64,
    max_total_size: u64,
}

impl Validator {
    /// Create a validator with the fixed production caps.
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_total_size: MAX_TOTAL_SIZE,
        }
    }

    /// Create a validator with custom caps. Test hook.
    pub fn with_limits(max_file_size: u64, max_total_size: u64) -> Self {
        Self {
            max_file_size,
            max_total_size,
        }
    }

    /// Screen a single candidate.
    ///
    /// `running_total` is the sum of already-queued sizes plus sizes
    /// accepted earlier in the current batch.
    ///
    /// On acceptance returns the candidate's bytes, already read for
    /// the probe, so the caller can enqueue without a second read.
    ///
    /// # Errors
    ///
    /// Returns the rejection: `WrongType`, `FileTooLarge`,
    /// `AggregateTooLarge`, or `CorruptPdf`.
    pub async fn screen(&self, candidate: &FileCandidate, running_total: u64) -> Result<Vec<u8>> {
        if candidate.mime != PDF_MIME {
            return Err(PdfDeckError::wrong_type(&candidate.name, &candidate.mime));
        }

        if candidate.size > self.max_file_size {
            return Err(PdfDeckError::file_too_large(
                &candidate.name,
                candidate.size,
                self.max_file_size,
            ));
        }

        let would_be = running_total.saturating_add(candidate.size);
        if would_be > self.max_total_size {
            return Err(PdfDeckError::aggregate_too_large(
                would_be,
                self.max_total_size,
            ));
        }

        // Cheap checks passed; now read the content and probe it.
        let bytes = candidate
            .source
            .read()
            .await
            .map_err(|e| PdfDeckError::corrupt_pdf(&candidate.name, e.to_string()))?;

        self.probe(&candidate.name, bytes).await
    }

    /// Parse-and-discard structural probe on the blocking pool.
    async fn probe(&self, name: &str, bytes: Vec<u8>) -> Result<Vec<u8>> {
        let (bytes, outcome) = task::spawn_blocking(move || {
            let outcome = Document::load_mem(&bytes)
                .map(|doc| doc.get_pages().len())
                .map_err(|e| e.to_string());
            (bytes, outcome)
        })
        .await
        .map_err(|e| PdfDeckError::other(format!("Probe task failed: {e}")))?;

        match outcome {
            Ok(0) => Err(PdfDeckError::corrupt_pdf(name, "PDF has no pages")),
            Ok(_) => Ok(bytes),
            Err(details) => Err(PdfDeckError::corrupt_pdf(name, details)),
        }
    }

    /// Screen a batch of candidates in order.
    ///
    /// Each outcome is reported individually. An aggregate-cap
    /// rejection terminates the batch: remaining candidates are
    /// skipped silently, without outcomes of their own. `on_progress`
    /// is called after each screened candidate with (done, total).
    pub async fn screen_batch<F>(
        &self,
        candidates: Vec<FileCandidate>,
        queued_total: u64,
        mut on_progress: F,
    ) -> Vec<ScreenOutcome>
    where
        F: FnMut(usize, usize),
    {
        let total = candidates.len();
        let mut running_total = queued_total;
        let mut outcomes = Vec::with_capacity(total);

        for (i, candidate) in candidates.into_iter().enumerate() {
            let result = self.screen(&candidate, running_total).await;
            on_progress(i + 1, total);

            let aggregate_hit = matches!(result, Err(PdfDeckError::AggregateTooLarge { .. }));
            if result.is_ok() {
                running_total += candidate.size;
            }

            outcomes.push(ScreenOutcome {
                name: candidate.name,
                size: candidate.size,
                result,
            });

            if aggregate_hit {
                break;
            }
        }

        outcomes
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
