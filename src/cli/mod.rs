//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod encrypt;
pub mod sync;

pub use encrypt::{handle_transform_command, TransformArgs};
pub use sync::{handle_sync_command, SyncArgs};

use std::io::IsTerminal;

use clap::Args;

use crate::config::{EnvcryptOptions, Settings};
use crate::crypto::SecretKey;
use crate::error::{EnvcryptError, EnvcryptResult};

/// Key and IV flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Secret key (prompted for when omitted on a terminal)
    #[arg(short = 'k', long, env = "ENVCRYPT_SECRET_KEY", hide_env_values = true, global = true)]
    pub secret_key: Option<String>,

    /// Fixed 16-byte IV; makes encryption deterministic
    #[arg(long, env = "ENVCRYPT_IV", hide_env_values = true, global = true)]
    pub iv: Option<String>,

    /// Use the legacy fixed IV when no IV is given
    #[arg(long, global = true)]
    pub legacy_iv: bool,
}

impl KeyArgs {
    /// Build operation options, prompting for the key if needed
    ///
    /// Without a key and without a terminal the key stays empty and the
    /// operation itself reports the missing key.
    pub fn into_options(self, settings: &Settings) -> EnvcryptResult<EnvcryptOptions> {
        let secret_key = match self.secret_key {
            Some(key) => SecretKey::new(key),
            None if std::io::stdin().is_terminal() => prompt_secret_key()?,
            None => SecretKey::new(""),
        };

        let mut options = EnvcryptOptions::new(secret_key);
        options.iv = self.iv;
        options.legacy_iv = self.legacy_iv || settings.legacy_iv;
        Ok(options)
    }
}

/// Prompt for the secret key (hidden input)
fn prompt_secret_key() -> EnvcryptResult<SecretKey> {
    rpassword::prompt_password("Secret key: ")
        .map(SecretKey::new)
        .map_err(|source| EnvcryptError::Io {
            context: "Failed to read secret key".into(),
            source,
        })
}
