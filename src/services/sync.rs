//! Timestamp-driven synchronization of a `.env` file and its encrypted copy
//!
//! The most recently modified file wins. Equal timestamps count as the
//! plaintext being newer, so the encrypted file is regenerated.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use super::Envcrypt;
use crate::config::EnvcryptOptions;
use crate::error::{EnvcryptError, EnvcryptResult};
use crate::storage::{modified_time, read_text, resolve_path, FileWriter};

/// Which way a sync propagated changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    /// The encrypted file was newer and the plaintext was regenerated
    CiphertextToPlaintext,
    /// The plaintext was newer (or equally new) and was re-encrypted
    PlaintextToCiphertext,
}

impl SyncDirection {
    /// Pick the direction from the two modification times
    pub fn from_timestamps(plaintext: SystemTime, ciphertext: SystemTime) -> Self {
        if ciphertext > plaintext {
            Self::CiphertextToPlaintext
        } else {
            Self::PlaintextToCiphertext
        }
    }
}

/// Outcome of a completed sync
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub direction: SyncDirection,
    /// File that was read
    pub source: PathBuf,
    /// File that was rewritten
    pub target: PathBuf,
    pub plaintext_modified: DateTime<Utc>,
    pub ciphertext_modified: DateTime<Utc>,
}

impl<W: FileWriter> Envcrypt<W> {
    /// Bring `ciphertext_path` and `plaintext_path` back in sync
    ///
    /// Holds the pair's lock until the rewritten file is on disk, so
    /// overlapping calls for the same pair run one after another.
    pub async fn sync_files(
        &self,
        ciphertext_path: impl AsRef<Path>,
        plaintext_path: impl AsRef<Path>,
        options: &EnvcryptOptions,
    ) -> EnvcryptResult<SyncReport> {
        let cipher = options.cipher_config()?;
        let ciphertext_path = resolve_path(ciphertext_path)?;
        let plaintext_path = resolve_path(plaintext_path)?;

        if !ciphertext_path.exists() {
            return Err(EnvcryptError::encrypted_not_found(ciphertext_path));
        }
        if !plaintext_path.exists() {
            return Err(EnvcryptError::plaintext_not_found(plaintext_path));
        }

        // Lock on the canonical pair so `..` segments and symlinks share it.
        let _guard = self
            .locks
            .lock(&canonical(&ciphertext_path)?, &canonical(&plaintext_path)?)
            .await;

        let plaintext_modified = modified_time(&plaintext_path)?;
        let ciphertext_modified = modified_time(&ciphertext_path)?;
        let direction = SyncDirection::from_timestamps(plaintext_modified, ciphertext_modified);

        let (source, target, value) = match direction {
            SyncDirection::CiphertextToPlaintext => {
                let value = cipher.open(&read_text(&ciphertext_path)?)?;
                (ciphertext_path, plaintext_path, value)
            }
            SyncDirection::PlaintextToCiphertext => {
                let value = cipher.seal(&read_text(&plaintext_path)?)?;
                (plaintext_path, ciphertext_path, value)
            }
        };
        tracing::debug!(
            ?direction,
            source = %source.display(),
            target = %target.display(),
            "Syncing file pair"
        );

        self.writer
            .write_file_safely(&target, value, None)?
            .wait()
            .await?;

        Ok(SyncReport {
            direction,
            source,
            target,
            plaintext_modified: plaintext_modified.into(),
            ciphertext_modified: ciphertext_modified.into(),
        })
    }
}

fn canonical(path: &Path) -> EnvcryptResult<PathBuf> {
    fs::canonicalize(path).map_err(|e| EnvcryptError::io("canonicalize", path, e))
}
