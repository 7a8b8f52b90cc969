//! Path management for envcrypt
//!
//! ## Path Resolution Order
//!
//! 1. `ENVCRYPT_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/envcrypt` on Linux,
//!    `~/Library/Application Support/envcrypt` on macOS, `%APPDATA%\envcrypt` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{EnvcryptError, EnvcryptResult};

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "ENVCRYPT_CONFIG_DIR";

/// Manages the paths used by envcrypt
#[derive(Debug, Clone)]
pub struct EnvcryptPaths {
    /// Base directory for envcrypt configuration
    base_dir: PathBuf,
}

impl EnvcryptPaths {
    /// Create a new EnvcryptPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> EnvcryptResult<Self> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "envcrypt")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    EnvcryptError::Config("Could not determine the config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create EnvcryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> EnvcryptResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvcryptError::io("create directory", &self.base_dir, e))
    }
}
