use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use envcrypt::cli::{handle_sync_command, handle_transform_command, KeyArgs, SyncArgs, TransformArgs};
use envcrypt::config::{EnvcryptPaths, Settings};
use envcrypt::services::{Envcrypt, TransformKind};

#[derive(Parser)]
#[command(
    name = "envcrypt",
    author = "Kaylee Beyene",
    version,
    about = "Encrypt, decrypt and sync .env files",
    long_about = "envcrypt encrypts environment files (or single values) with AES-256-GCM \
                  and keeps a .env file and its encrypted copy in sync, letting the most \
                  recently modified file win."
)]
struct Cli {
    #[command(flatten)]
    key: KeyArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a .env file or a single value
    #[command(alias = "enc")]
    Encrypt(TransformArgs),

    /// Decrypt an encrypted file or a single value
    #[command(alias = "dec")]
    Decrypt(TransformArgs),

    /// Regenerate whichever of the pair is older from the newer one
    Sync(SyncArgs),

    /// Show current configuration and paths
    Config,

    /// Print the envcrypt version
    Version,
}

/// Load the settings file, falling back to defaults when it doesn't exist
fn load_settings() -> Result<(EnvcryptPaths, Settings)> {
    let paths = EnvcryptPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    Ok((paths, settings))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (paths, settings) = match cli.command {
        Commands::Version => {
            println!("{}", envcrypt::version());
            return Ok(());
        }
        _ => load_settings()?,
    };

    let log_level = if cli.verbose { "debug" } else { settings.log_level.as_str() };
    envcrypt::telemetry::init_tracing(log_level)?;

    let service = Envcrypt::new();

    match cli.command {
        Commands::Encrypt(args) => {
            let options = cli.key.into_options(&settings)?;
            handle_transform_command(&service, &settings, options, TransformKind::Encrypt, args)
                .await
                .context("encrypt failed")?;
        }
        Commands::Decrypt(args) => {
            let options = cli.key.into_options(&settings)?;
            handle_transform_command(&service, &settings, options, TransformKind::Decrypt, args)
                .await
                .context("decrypt failed")?;
        }
        Commands::Sync(args) => {
            let options = cli.key.into_options(&settings)?;
            handle_sync_command(&service, options, args)
                .await
                .context("sync failed")?;
        }
        Commands::Config => {
            println!("envcrypt Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Encrypted file name: {}", settings.default_enc_file_name);
            println!("Env file name:       {}", settings.default_env_file_name);
            println!("Legacy IV:           {}", settings.legacy_iv);
            println!("Log level:           {}", settings.log_level);
        }
        Commands::Version => {}
    }

    Ok(())
}
