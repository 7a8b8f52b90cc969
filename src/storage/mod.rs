//! Storage layer for envcrypt
//!
//! Provides text file reads, atomic writes run in the background, and the
//! path helpers the transform and sync operations rely on.

pub mod file_io;
pub mod writer;

pub use file_io::{is_directory, modified_time, read_text, resolve_path, write_text_atomic};
pub use writer::{AtomicWriter, FileWriter, PendingWrite};
