//! Output I/O.
//!
//! Writing the merged bytes to disk is the terminal counterpart of
//! the browser download the session triggers on success.

pub mod writer;

pub use writer::{OutputWriter, WriteOptions};
