//! Encrypt and decrypt CLI commands
//!
//! Transforms a file or literal value, prints the result to stdout and waits
//! for the output file (if any) to be written.

use std::path::PathBuf;

use clap::Args;

use crate::config::{EnvcryptOptions, Settings};
use crate::error::EnvcryptResult;
use crate::services::{Envcrypt, TransformKind};

/// Arguments shared by `encrypt` and `decrypt`
#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    /// Path to the input file, or the literal value to transform
    pub input: String,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Output file name (defaults to `out.enc` / `.env` or the configured name)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Only print the result, don't write a file
    #[arg(long)]
    pub no_write: bool,
}

/// Handle `encrypt` and `decrypt`
pub async fn handle_transform_command(
    envcrypt: &Envcrypt,
    settings: &Settings,
    mut options: EnvcryptOptions,
    kind: TransformKind,
    args: TransformArgs,
) -> EnvcryptResult<()> {
    options.disable_write_file = args.no_write;
    options.enc_file_name = Some(
        args.file_name
            .unwrap_or_else(|| settings.file_name_for(kind).to_string()),
    );

    let (value, write) = envcrypt
        .transform(kind, &args.input, &options, Some(&args.output))?
        .into_parts();

    println!("{}", value);

    if let Some(write) = write {
        let path = write.wait().await?;
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
