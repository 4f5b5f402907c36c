//! The ordered file queue.
//!
//! A [`FileQueue`] holds validated files in merge order. Order is
//! semantically meaningful: it determines both display position and
//! the page order of the merged output. Entries are owned exclusively
//! by the queue while present; removal transfers ownership back to
//! the caller (typically into a history command so the removal can be
//! undone).

use crate::error::{PdfDeckError, Result};

/// Session-unique identifier for a queued file.
///
/// Ids are assigned once at entry creation and never reused, so a
/// command can locate "the same file" after arbitrary reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// Create an entry id from a raw counter value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One queued file awaiting merge.
#[derive(Debug, Clone)]
pub struct FileEntry {
    id: EntryId,
    /// Display name of the file.
    pub name: String,
    /// Declared size of the file in bytes.
    pub size: u64,
    bytes: Vec<u8>,
}

impl FileEntry {
    /// Create an entry from validated content.
    pub fn new(id: EntryId, name: impl Into<String>, size: u64, bytes: Vec<u8>) -> Self {
        Self {
            id,
            name: name.into(),
            size,
            bytes,
        }
    }

    /// The entry's session-unique id.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The entry's raw PDF content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Ordered sequence of queued files.
#[derive(Debug, Default)]
pub struct FileQueue {
    entries: Vec<FileEntry>,
}

impl FileQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the queue.
    ///
    /// Always succeeds; validation happens upstream.
    pub fn append(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid position.
    pub fn remove_at(&mut self, index: usize) -> Result<FileEntry> {
        if index >= self.entries.len() {
            return Err(PdfDeckError::index_out_of_range(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    /// Move the entry at `from` so it ends up at position `to`.
    ///
    /// The entry is removed first and reinserted into the shortened
    /// sequence, matching drag-and-drop semantics. `from == to` is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is not a valid
    /// position in the queue as it stood before the move.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        if from >= len {
            return Err(PdfDeckError::index_out_of_range(from, len));
        }
        if to >= len {
            return Err(PdfDeckError::index_out_of_range(to, len));
        }
        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Ok(())
    }

    /// Insert an entry at `index`, clamped to the current length.
    ///
    /// Used by history when reversing a removal; the recorded index
    /// may exceed the current length if other entries were removed in
    /// between.
    pub(crate) fn insert_at(&mut self, index: usize, entry: FileEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Empty the queue, dropping all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of all entry sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Current position of the entry with the given id.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Iterate over entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    /// Names of all entries in queue order. Handy for assertions.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}
