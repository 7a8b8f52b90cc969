//! User settings for envcrypt
//!
//! Persistent defaults for output file names, the IV mode and log level.

use serde::{Deserialize, Serialize};

use super::paths::EnvcryptPaths;
use crate::error::{EnvcryptError, EnvcryptResult};
use crate::services::TransformKind;
use crate::storage::{read_text, write_text_atomic};

/// User settings for envcrypt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name written by `encrypt` when none is given
    #[serde(default = "default_enc_file_name")]
    pub default_enc_file_name: String,

    /// File name written by `decrypt` when none is given
    #[serde(default = "default_env_file_name")]
    pub default_env_file_name: String,

    /// Use the legacy fixed IV when no IV is given
    #[serde(default)]
    pub legacy_iv: bool,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_enc_file_name() -> String {
    TransformKind::Encrypt.default_file_name().to_string()
}

fn default_env_file_name() -> String {
    TransformKind::Decrypt.default_file_name().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_enc_file_name: default_enc_file_name(),
            default_env_file_name: default_env_file_name(),
            legacy_iv: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Output file name for a transform direction
    pub fn file_name_for(&self, kind: TransformKind) -> &str {
        match kind {
            TransformKind::Encrypt => &self.default_enc_file_name,
            TransformKind::Decrypt => &self.default_env_file_name,
        }
    }

    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &EnvcryptPaths) -> EnvcryptResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = read_text(&settings_path)?;
        serde_json::from_str(&contents).map_err(|e| {
            EnvcryptError::Config(format!(
                "Failed to parse settings file {}: {}",
                settings_path.display(),
                e
            ))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvcryptPaths) -> EnvcryptResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EnvcryptError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_text_atomic(paths.settings_file(), &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.file_name_for(TransformKind::Encrypt), "out.enc");
        assert_eq!(settings.file_name_for(TransformKind::Decrypt), ".env");
        assert!(!settings.legacy_iv);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(Settings::load_or_create(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().join("envcrypt"));

        let settings = Settings {
            default_enc_file_name: "secrets.enc".into(),
            legacy_iv: true,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"log_level": "debug"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.default_enc_file_name, "out.enc");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvcryptPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(Settings::load_or_create(&paths).unwrap_err().is_config());
    }
}
