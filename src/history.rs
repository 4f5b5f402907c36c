//! Undo/redo history over queue mutations.
//!
//! Every mutating user action on the queue records one [`Command`] on
//! the undo stack. Undoing pops the command, applies its inverse to
//! the queue, and parks it on the redo stack; redoing does the
//! reverse. Recording a fresh mutation clears the redo stack, so
//! history is always a single timeline.
//!
//! Ownership: the queue owns entries while they are queued. When a
//! command takes an entry off the queue (a removal, or the undo of an
//! add), the entry moves into the command's stash slot so the
//! opposite direction can put it back.
//!
//! Index semantics match the interactive behavior they record:
//! undoing an add finds the entry by id wherever it currently sits
//! (the queue may have been reordered since), while remove and move
//! replay their recorded indices directly. If an index has become
//! unreachable or the entry is gone, that command's application is a
//! no-op; the command still migrates between stacks.

use crate::queue::{EntryId, FileEntry, FileQueue};

/// A single reversible queue mutation.
#[derive(Debug)]
pub enum Command {
    /// An entry was appended to the queue.
    Add {
        /// Id of the added entry.
        id: EntryId,
        /// Holds the entry while the add is undone.
        stashed: Option<FileEntry>,
    },
    /// An entry was removed from `index`.
    Remove {
        /// Position the entry was removed from.
        index: usize,
        /// Holds the removed entry while it is off the queue.
        stashed: Option<FileEntry>,
    },
    /// An entry was moved from `from` to `to`.
    Move {
        /// Original position.
        from: usize,
        /// Position after the move.
        to: usize,
    },
}

/// Undo and redo stacks of commands.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly performed mutation.
    ///
    /// Clears the redo stack: a new mutation after an undo starts a
    /// diverging timeline and pending redos are discarded.
    pub fn record(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation.
    ///
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, queue: &mut FileQueue) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };

        match &mut command {
            Command::Add { id, stashed } => {
                // Locate by identity; the entry may have been moved,
                // or already removed by a separate action.
                if let Some(index) = queue.position_of(*id)
                    && let Ok(entry) = queue.remove_at(index)
                {
                    *stashed = Some(entry);
                }
            }
            Command::Remove { index, stashed } => {
                if let Some(entry) = stashed.take() {
                    queue.insert_at(*index, entry);
                }
            }
            Command::Move { from, to } => {
                let _ = queue.move_to(*to, *from);
            }
        }

        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone mutation.
    ///
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self, queue: &mut FileQueue) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };

        match &mut command {
            Command::Add { stashed, .. } => {
                if let Some(entry) = stashed.take() {
                    queue.append(entry);
                }
            }
            Command::Remove { index, stashed } => {
                if let Ok(entry) = queue.remove_at(*index) {
                    *stashed = Some(entry);
                }
            }
            Command::Move { from, to } => {
                let _ = queue.move_to(*from, *to);
            }
        }

        self.undo_stack.push(command);
        true
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
