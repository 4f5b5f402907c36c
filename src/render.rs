//! Projection of queue state for display.
//!
//! [`render`] turns the current queue into a [`RenderState`]: a pure,
//! serializable snapshot any front end can draw from. Nothing here
//! mutates the queue; reordering and removal are intents fed back to
//! the session by the surface that drew the list.

use serde::Serialize;

use crate::config::COMPRESSION_ESTIMATE_FACTOR;
use crate::queue::FileQueue;

/// One row of the rendered file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    /// 1-based display position; doubles as the merge order.
    pub position: usize,
    /// Filename.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Human-readable size.
    pub size_display: String,
}

/// Snapshot of everything a front end needs to draw the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    /// Queued files in merge order.
    pub items: Vec<RenderItem>,
    /// Total queued size in bytes.
    pub total_size: u64,
    /// Human-readable total size.
    pub total_size_display: String,
    /// Estimated output size, scaled by the compression factor.
    ///
    /// Display estimate only; the merged document's real size depends
    /// on its contents.
    pub estimated_size_display: String,
    /// Whether output compaction is enabled.
    pub compress: bool,
    /// Whether a merge can be started (at least two files queued).
    pub can_merge: bool,
    /// Whether a merge is currently running.
    pub merging: bool,
}

/// Project the queue into a render snapshot.
pub fn render(queue: &FileQueue, compress: bool, merging: bool) -> RenderState {
    let items = queue
        .iter()
        .enumerate()
        .map(|(i, entry)| RenderItem {
            position: i + 1,
            name: entry.name.clone(),
            size: entry.size,
            size_display: format_file_size(entry.size),
        })
        .collect();

    let total_size = queue.total_size();
    let factor = if compress {
        COMPRESSION_ESTIMATE_FACTOR
    } else {
        1.0
    };
    let estimated = (total_size as f64 * factor) as u64;

    RenderState {
        items,
        total_size,
        total_size_display: format_file_size(total_size),
        estimated_size_display: format_file_size(estimated),
        compress,
        can_merge: queue.len() >= 2,
        merging,
    }
}

/// Format a byte count as a human-readable string.
///
/// Binary units, two decimal places with trailing zeros trimmed, unit
/// chosen as the largest where the scaled value is at least 1:
/// `0 -> "0 Bytes"`, `1536 -> "1.5 KB"`, `1048576 -> "1 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    const K: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / K.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / K.powi(exponent as i32);

    let mut value = format!("{scaled:.2}");
    if value.contains('.') {
        value = value.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    format!("{value} {}", UNITS[exponent])
}
