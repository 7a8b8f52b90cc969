//! Custom error types for envcrypt
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for envcrypt operations
#[derive(Error, Debug)]
pub enum EnvcryptError {
    /// Missing or invalid caller configuration, raised before any I/O
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file that must exist for a sync is missing
    #[error("{kind} file not found: {}", path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    /// Cipher rejected the key/IV, or a ciphertext could not be decoded
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// A background write was requested outside a tokio runtime
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Read or write failure at the filesystem boundary
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl EnvcryptError {
    /// Create a "not found" error for the encrypted side of a pair
    pub fn encrypted_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            kind: "Encrypted",
            path: path.into(),
        }
    }

    /// Create a "not found" error for the plaintext side of a pair
    pub fn plaintext_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            kind: "Env",
            path: path.into(),
        }
    }

    /// Wrap an I/O error with the operation and path it failed on
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("Failed to {} {}", action, path.display()),
            source,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a crypto error
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto(_))
    }
}

/// Result type alias for envcrypt operations
pub type EnvcryptResult<T> = Result<T, EnvcryptError>;
