//! envcrypt - Encrypted `.env` files kept in sync with their plaintext
//!
//! This library encrypts and decrypts environment-variable files (or raw
//! values) with AES-256-GCM, and reconciles a `.env` file with its encrypted
//! counterpart by letting the most recently modified file win.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Per-call options, config paths and user settings
//! - `crypto`: The encrypt/decrypt transform and IV handling
//! - `error`: Custom error types
//! - `services`: Single-item transforms and file pair sync
//! - `storage`: Text file I/O and background atomic writes
//! - `cli`: Command handlers for the `envcrypt` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use envcrypt::{EnvcryptOptions, Envcrypt};
//!
//! let envcrypt = Envcrypt::new();
//! let options = EnvcryptOptions::new("k1");
//!
//! let encrypted = envcrypt.to_encrypted_form(".env", &options, Some(".".as_ref()))?;
//! encrypted.persist().await?;
//!
//! envcrypt.sync_files("out.enc", ".env", &options).await?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use config::EnvcryptOptions;
pub use crypto::{CipherConfig, IvMode};
pub use error::{EnvcryptError, EnvcryptResult};
pub use services::{Envcrypt, Input, SyncDirection, SyncReport, Transformed};

/// Crate version reported by `envcrypt version`
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Encrypt a single value with an explicit key and IV
pub fn encrypt_single_data(secret: &str, iv: &str, data: &str) -> EnvcryptResult<String> {
    crypto::encrypt(secret, iv, data)
}

/// Decrypt a single value with an explicit key and IV
pub fn decrypt_single_data(secret: &str, iv: &str, data: &str) -> EnvcryptResult<String> {
    crypto::decrypt(secret, iv, data)
}
