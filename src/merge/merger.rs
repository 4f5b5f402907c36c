//! Core merge implementation over lopdf documents.

use lopdf::{Document, Object, ObjectId};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfDeckError, Result};
use crate::queue::FileQueue;

/// Statistics about a completed merge.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Total number of pages in the output.
    pub total_pages: usize,

    /// Sum of input sizes in bytes.
    pub input_size: u64,

    /// Wall-clock time the merge took.
    pub merge_time: Duration,

    /// Whether output compaction was applied.
    pub compressed: bool,
}

/// Result of a merge: serialized output plus statistics.
#[derive(Debug)]
pub struct MergeOutput {
    /// The merged document, serialized and ready to write.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Merges the queue's documents into one.
#[derive(Debug, Default)]
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge every queued document, in queue order, into one output.
    ///
    /// Sources are parsed one at a time; `on_progress` is called with
    /// (files processed, total files) after each. With `compress` the
    /// output is compacted before serialization.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFiles` if fewer than two files are queued
    /// (before any document work), or `MergeFailed` if parsing,
    /// page splicing, or serialization fails. The queue is never
    /// modified.
    pub async fn merge<F>(
        &self,
        queue: &FileQueue,
        compress: bool,
        mut on_progress: F,
    ) -> Result<MergeOutput>
    where
        F: FnMut(usize, usize),
    {
        let total = queue.len();
        if total < 2 {
            return Err(PdfDeckError::insufficient_files(total));
        }

        let merge_start = Instant::now();

        let mut merged: Option<Document> = None;
        let mut max_id: u32 = 0;

        for (i, entry) in queue.iter().enumerate() {
            let doc = parse_document(entry.name.clone(), entry.bytes().to_vec()).await?;

            match merged.as_mut() {
                None => {
                    max_id = doc.max_id;
                    merged = Some(doc);
                }
                Some(target) => {
                    let mut doc = doc;

                    // Renumber objects so ids don't collide with the
                    // accumulated output.
                    doc.renumber_objects_with(max_id + 1);
                    max_id = doc.max_id;

                    // get_pages is keyed by page number, so values
                    // come out in the source's original page order.
                    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

                    target.objects.extend(doc.objects);
                    add_pages_to_tree(target, &page_ids)?;
                }
            }

            on_progress(i + 1, total);
        }

        // total >= 2 guarantees the loop ran.
        let Some(mut document) = merged else {
            return Err(PdfDeckError::merge_failed("No documents were merged"));
        };

        if compress {
            document.compress();
        }
        document.renumber_objects();

        let total_pages = document.get_pages().len();
        let bytes = serialize_document(document).await?;

        let statistics = MergeStatistics {
            files_merged: total,
            total_pages,
            input_size: queue.total_size(),
            merge_time: merge_start.elapsed(),
            compressed: compress,
        };

        Ok(MergeOutput { bytes, statistics })
    }
}

/// Parse one source document on the blocking pool.
async fn parse_document(name: String, bytes: Vec<u8>) -> Result<Document> {
    task::spawn_blocking(move || {
        Document::load_mem(&bytes)
            .map_err(|e| PdfDeckError::merge_failed(format!("Failed to load {name}: {e}")))
    })
    .await
    .map_err(|e| PdfDeckError::other(format!("Parse task failed: {e}")))?
}

/// Serialize the merged document on the blocking pool.
async fn serialize_document(mut document: Document) -> Result<Vec<u8>> {
    task::spawn_blocking(move || {
        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| PdfDeckError::merge_failed(format!("Failed to serialize output: {e}")))?;
        Ok(bytes)
    })
    .await
    .map_err(|e| PdfDeckError::other(format!("Serialize task failed: {e}")))?
}

/// Append page references to the output document's page tree.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let Object::Dictionary(dict) = pages_dict else {
        return Err(PdfDeckError::merge_failed(
            "Pages object is not a dictionary",
        ));
    };

    let kids = dict
        .get_mut(b"Kids")
        .map_err(|_| PdfDeckError::merge_failed("Pages dictionary missing Kids array"))?;

    let Object::Array(kids_array) = kids else {
        return Err(PdfDeckError::merge_failed("Kids is not an array"));
    };
    for &page_id in page_ids {
        kids_array.push(Object::Reference(page_id));
    }

    let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
    dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
