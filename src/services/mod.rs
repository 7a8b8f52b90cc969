//! Business logic layer
//!
//! [`Envcrypt`] owns the file writer and the per-pair sync locks and exposes
//! the single-item transforms and the pair sync on top of them.

pub mod input;
pub mod locks;
pub mod sync;
pub mod transform;

pub use input::Input;
pub use locks::PairLocks;
pub use sync::{SyncDirection, SyncReport};
pub use transform::{TransformKind, Transformed};

use crate::storage::{AtomicWriter, FileWriter};

/// Entry point for transform and sync operations
///
/// Overlapping [`Envcrypt::sync_files`] calls on one instance serialize per
/// file pair, so share a single instance between tasks that sync the same
/// files.
#[derive(Debug, Default)]
pub struct Envcrypt<W: FileWriter = AtomicWriter> {
    writer: W,
    locks: PairLocks,
}

impl Envcrypt<AtomicWriter> {
    /// Create an instance that writes with [`AtomicWriter`]
    pub fn new() -> Self {
        Self::with_writer(AtomicWriter::new())
    }
}

impl<W: FileWriter> Envcrypt<W> {
    /// Create an instance with a custom writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            locks: PairLocks::new(),
        }
    }

    /// Get the writer
    pub fn writer(&self) -> &W {
        &self.writer
    }
}
