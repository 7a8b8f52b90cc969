//! Sync CLI command

use std::path::PathBuf;

use clap::Args;

use crate::config::EnvcryptOptions;
use crate::error::EnvcryptResult;
use crate::services::{Envcrypt, SyncDirection};

/// Arguments for `sync`
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Encrypted file
    pub enc_file: PathBuf,

    /// Plaintext `.env` file
    pub env_file: PathBuf,
}

/// Handle `sync`
pub async fn handle_sync_command(
    envcrypt: &Envcrypt,
    options: EnvcryptOptions,
    args: SyncArgs,
) -> EnvcryptResult<()> {
    let report = envcrypt
        .sync_files(&args.enc_file, &args.env_file, &options)
        .await?;

    let action = match report.direction {
        SyncDirection::CiphertextToPlaintext => "Decrypted",
        SyncDirection::PlaintextToCiphertext => "Encrypted",
    };
    println!(
        "{} {} -> {}",
        action,
        report.source.display(),
        report.target.display()
    );

    Ok(())
}
