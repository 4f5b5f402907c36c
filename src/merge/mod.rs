//! Merging queued documents into one output.
//!
//! The merge walks the queue in order, parses each entry's bytes, and
//! splices its pages onto the end of the accumulated output document.
//! Work is strictly sequential so page order is deterministic and at
//! most one source document is held in parsed form at a time.

pub mod merger;

pub use merger::{MergeOutput, MergeStatistics, Merger};
