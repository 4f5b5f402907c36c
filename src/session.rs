//! The merge session.
//!
//! A [`MergeSession`] owns all mutable state: the file queue, the
//! undo/redo history, the compression toggle, and the merge busy
//! flag. Callers never touch that state directly. They submit
//! [`Intent`] values through [`MergeSession::dispatch`], receive
//! notices describing what happened, and pull a fresh
//! [`RenderState`](crate::render::RenderState) snapshot whenever they
//! want to redraw.
//!
//! Interactive questions (clearing the queue after a merge) go
//! through an injected confirmation callback, so the session itself
//! never reads stdin and tests can script both answers.

use crate::config::Config;
use crate::error::{PdfDeckError, Result};
use crate::history::{Command, History};
use crate::io::OutputWriter;
use crate::merge::{MergeStatistics, Merger};
use crate::output::Notice;
use crate::queue::{EntryId, FileEntry, FileQueue};
use crate::render::{render, RenderState};
use crate::validation::{FileCandidate, Validator};

/// Asks the user a yes/no question.
pub type ConfirmFn = Box<dyn FnMut(&str) -> bool + Send>;

/// Receives (done, total) ticks, tagged with the pass producing them.
pub type ProgressFn = Box<dyn FnMut(ProgressPhase, usize, usize) + Send>;

/// The pass a progress tick belongs to.
///
/// Validation and merging report through the same callback; the phase
/// lets the caller keep separate readouts (and separate timings) for
/// the two passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Screening candidates before they enter the queue.
    Validating,
    /// Concatenating queued documents.
    Merging,
}

/// One state-changing request submitted to the session.
#[derive(Debug)]
pub enum Intent {
    /// Screen the candidates and queue the ones that pass.
    AddFiles(Vec<FileCandidate>),
    /// Remove the queued file at this position.
    RemoveFile(usize),
    /// Move a queued file from one position to another.
    ReorderFile { from: usize, to: usize },
    /// Reverse the most recent queue mutation.
    Undo,
    /// Re-apply the most recently undone mutation.
    Redo,
    /// Flip the compression setting.
    ToggleCompression,
    /// Merge the queued files and write the output.
    Merge,
}

/// Owns session state and consumes intents.
pub struct MergeSession {
    queue: FileQueue,
    history: History,
    compress: bool,
    merging: bool,
    next_id: u64,
    validator: Validator,
    merger: Merger,
    writer: OutputWriter,
    config: Config,
    confirm: ConfirmFn,
    progress: ProgressFn,
}

impl MergeSession {
    /// Create a session with the given configuration.
    ///
    /// The confirmation callback defaults to answering no, so nothing
    /// destructive happens until a real one is injected.
    pub fn new(config: Config) -> Self {
        Self {
            queue: FileQueue::new(),
            history: History::new(),
            compress: config.compress,
            merging: false,
            next_id: 0,
            validator: Validator::new(),
            merger: Merger::new(),
            writer: OutputWriter::new(),
            config,
            confirm: Box::new(|_| false),
            progress: Box::new(|_, _, _| {}),
        }
    }

    /// Replace the confirmation callback.
    pub fn with_confirm(mut self, confirm: ConfirmFn) -> Self {
        self.confirm = confirm;
        self
    }

    /// Replace the progress callback.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = progress;
        self
    }

    /// Snapshot the current state for display.
    pub fn snapshot(&self) -> RenderState {
        render(&self.queue, self.compress, self.merging)
    }

    /// Number of queued files.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether a merge is currently running.
    pub fn is_merging(&self) -> bool {
        self.merging
    }

    /// Consume one intent, mutating session state and reporting what
    /// happened as displayable notices.
    pub async fn dispatch(&mut self, intent: Intent) -> Vec<Notice> {
        match intent {
            Intent::AddFiles(candidates) => self.add_files(candidates).await,
            Intent::RemoveFile(index) => self.remove_file(index),
            Intent::ReorderFile { from, to } => self.reorder_file(from, to),
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::ToggleCompression => self.toggle_compression(),
            Intent::Merge => self.merge().await,
        }
    }

    async fn add_files(&mut self, candidates: Vec<FileCandidate>) -> Vec<Notice> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let queued_total = self.queue.total_size();
        let progress = &mut self.progress;
        let outcomes = self
            .validator
            .screen_batch(candidates, queued_total, |done, total| {
                progress(ProgressPhase::Validating, done, total)
            })
            .await;

        let mut notices = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome.result {
                Ok(bytes) => {
                    let id = EntryId::new(self.next_id);
                    self.next_id += 1;

                    let entry = FileEntry::new(id, outcome.name.clone(), outcome.size, bytes);
                    self.queue.append(entry);
                    self.history.record(Command::Add { id, stashed: None });

                    notices.push(Notice::success(format!("Added {}", outcome.name)));
                }
                Err(err) => notices.push(Notice::error(err.to_string())),
            }
        }
        notices
    }

    fn remove_file(&mut self, index: usize) -> Vec<Notice> {
        match self.queue.remove_at(index) {
            Ok(entry) => {
                let name = entry.name.clone();
                self.history.record(Command::Remove {
                    index,
                    stashed: Some(entry),
                });
                vec![Notice::success(format!("Removed {name}"))]
            }
            Err(err) => vec![Notice::error(err.to_string())],
        }
    }

    fn reorder_file(&mut self, from: usize, to: usize) -> Vec<Notice> {
        // A drop on the original position changes nothing, so nothing
        // is recorded and undo stays aimed at the previous mutation.
        if from == to {
            return Vec::new();
        }

        match self.queue.move_to(from, to) {
            Ok(()) => {
                self.history.record(Command::Move { from, to });
                Vec::new()
            }
            Err(err) => vec![Notice::error(err.to_string())],
        }
    }

    fn undo(&mut self) -> Vec<Notice> {
        if self.history.undo(&mut self.queue) {
            vec![Notice::info("Undo successful")]
        } else {
            vec![Notice::info("Nothing to undo")]
        }
    }

    fn redo(&mut self) -> Vec<Notice> {
        if self.history.redo(&mut self.queue) {
            vec![Notice::info("Redo successful")]
        } else {
            vec![Notice::info("Nothing to redo")]
        }
    }

    fn toggle_compression(&mut self) -> Vec<Notice> {
        self.compress = !self.compress;
        let state = if self.compress { "enabled" } else { "disabled" };
        vec![Notice::info(format!("Compression {state}"))]
    }

    async fn merge(&mut self) -> Vec<Notice> {
        if self.merging {
            return vec![Notice::warning("A merge is already in progress")];
        }
        if self.queue.len() < 2 {
            return vec![Notice::error(
                PdfDeckError::insufficient_files(self.queue.len()).to_string(),
            )];
        }

        self.merging = true;
        let result = self.run_merge().await;
        self.merging = false;

        match result {
            Ok(statistics) => {
                let mut notices = vec![Notice::success(format!(
                    "Merged {} files ({} pages) into {}",
                    statistics.files_merged,
                    statistics.total_pages,
                    self.config.output.display()
                ))];

                if (self.confirm)("Clear the file queue?") {
                    self.queue.clear();
                    self.history.clear();
                    notices.push(Notice::info("File queue cleared"));
                }
                notices
            }
            Err(err) => vec![Notice::error(err.to_string())],
        }
    }

    /// Merge and write, leaving queue and history untouched.
    async fn run_merge(&mut self) -> Result<MergeStatistics> {
        let progress = &mut self.progress;
        let output = self
            .merger
            .merge(&self.queue, self.compress, |done, total| {
                progress(ProgressPhase::Merging, done, total)
            })
            .await?;

        self.writer
            .save_bytes(output.bytes, &self.config.output)
            .await?;

        Ok(output.statistics)
    }
}
