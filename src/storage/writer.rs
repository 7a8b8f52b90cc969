//! Background atomic file writer
//!
//! Writes run on tokio's blocking pool. Each write hands back a
//! [`PendingWrite`] that the caller may await or drop; either way the outcome
//! is logged when the write finishes.

use std::path::{Path, PathBuf};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::file_io::write_text_atomic;
use crate::error::{EnvcryptError, EnvcryptResult};

/// Something that can persist text to disk without blocking the caller
pub trait FileWriter: Send + Sync {
    /// Start writing `content`
    ///
    /// With a `name`, `path` is treated as a directory and the file is
    /// written to `path/name`. Without one, `path` is the file itself.
    fn write_file_safely(
        &self,
        path: &Path,
        content: String,
        name: Option<&str>,
    ) -> EnvcryptResult<PendingWrite>;
}

/// Handle to an in-flight file write
#[derive(Debug)]
pub struct PendingWrite {
    target: PathBuf,
    handle: JoinHandle<EnvcryptResult<PathBuf>>,
}

impl PendingWrite {
    /// The file being written
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Check if the write has finished, successfully or not
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the write to finish and return the written path
    pub async fn wait(self) -> EnvcryptResult<PathBuf> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(EnvcryptError::Io {
                context: format!("Write task for {} did not complete", self.target.display()),
                source: std::io::Error::other(e),
            }),
        }
    }
}

/// Default [`FileWriter`] using temp-file-and-rename writes
///
/// Writes are spawned on the current tokio runtime; outside one,
/// `write_file_safely` fails with [`EnvcryptError::Runtime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicWriter;

impl AtomicWriter {
    /// Create a new AtomicWriter
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for AtomicWriter {
    fn write_file_safely(
        &self,
        path: &Path,
        content: String,
        name: Option<&str>,
    ) -> EnvcryptResult<PendingWrite> {
        let target = match name {
            Some(name) => path.join(name),
            None => path.to_path_buf(),
        };

        let runtime = Handle::try_current().map_err(|e| {
            EnvcryptError::Runtime(format!(
                "Cannot write {} without a tokio runtime: {}",
                target.display(),
                e
            ))
        })?;

        let task_target = target.clone();
        let handle = runtime.spawn_blocking(move || {
            let result = write_text_atomic(&task_target, &content).map(|_| task_target.clone());
            match &result {
                Ok(path) => tracing::info!(path = %path.display(), "Successfully wrote file"),
                Err(e) => tracing::error!(path = %task_target.display(), error = %e, "Failed to write file"),
            }
            result
        });

        Ok(PendingWrite { target, handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_to_named_file_in_directory() {
        let temp_dir = TempDir::new().unwrap();

        let pending = AtomicWriter::new()
            .write_file_safely(temp_dir.path(), "payload".to_string(), Some("out.enc"))
            .unwrap();
        assert_eq!(pending.target(), temp_dir.path().join("out.enc"));

        let written = pending.wait().await.unwrap();
        assert_eq!(written, temp_dir.path().join("out.enc"));
        assert_eq!(fs::read_to_string(written).unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_write_to_exact_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");

        let written = AtomicWriter::new()
            .write_file_safely(&path, "A=1".to_string(), None)
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1");
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let result = AtomicWriter::new()
            .write_file_safely(&blocker, "payload".to_string(), Some("out.enc"))
            .unwrap()
            .wait()
            .await;

        assert!(matches!(result, Err(EnvcryptError::Io { .. })));
    }

    #[test]
    fn test_write_without_runtime_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = AtomicWriter::new()
            .write_file_safely(temp_dir.path(), "payload".to_string(), Some("out.enc"))
            .unwrap_err();

        assert!(matches!(err, EnvcryptError::Runtime(_)));
        assert!(!temp_dir.path().join("out.enc").exists());
    }

    #[tokio::test]
    async fn test_dropped_write_still_lands() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.enc");

        drop(
            AtomicWriter::new()
                .write_file_safely(temp_dir.path(), "payload".to_string(), Some("out.enc"))
                .unwrap(),
        );

        tokio::time::timeout(Duration::from_secs(5), async {
            while fs::read_to_string(&path).map(|s| s != "payload").unwrap_or(true) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }
}
