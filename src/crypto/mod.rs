//! Cryptographic functions for envcrypt
//!
//! Provides AES-256-GCM encryption of text payloads keyed by a caller-supplied
//! secret and initialization vector.

pub mod cipher_config;
pub mod encryption;
pub mod secure_memory;

pub use cipher_config::{CipherConfig, IvMode, DEFAULT_IV};
pub use encryption::{decrypt, encrypt, IV_SIZE};
pub use secure_memory::SecretKey;
