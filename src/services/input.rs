//! Input classification for single-item transforms

use std::path::PathBuf;

use crate::error::{EnvcryptError, EnvcryptResult};
use crate::storage::{is_directory, resolve_path};

/// What a single-item transform operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Load the payload from this file
    FromFile(PathBuf),
    /// Transform this text directly
    FromLiteral(String),
}

impl Input {
    /// Decide whether `raw` names a file or is the payload itself
    ///
    /// An existing regular file (relative to the working directory) is read;
    /// an existing directory is rejected; anything else is literal text.
    pub fn detect(raw: &str) -> EnvcryptResult<Self> {
        if raw.is_empty() {
            return Err(EnvcryptError::Config(
                "Input path or value should be provided".into(),
            ));
        }

        let path = resolve_path(raw)?;
        if is_directory(&path) {
            return Err(EnvcryptError::Config(format!(
                "Input {} is a directory",
                path.display()
            )));
        }

        let input = if path.is_file() {
            Self::FromFile(path)
        } else {
            Self::FromLiteral(raw.to_string())
        };
        tracing::debug!(file_mode = input.is_file(), "Detected input mode");

        Ok(input)
    }

    /// Check if this input is read from disk
    pub fn is_file(&self) -> bool {
        matches!(self, Self::FromFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_existing_file_is_file_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "A=1").unwrap();

        let input = Input::detect(path.to_str().unwrap()).unwrap();
        assert_eq!(input, Input::FromFile(path));
    }

    #[test]
    fn test_plain_text_is_literal_mode() {
        let input = Input::detect("API_KEY=abc123").unwrap();
        assert_eq!(input, Input::FromLiteral("API_KEY=abc123".into()));
    }

    #[test]
    fn test_base64_with_slashes_is_literal_mode() {
        let input = Input::detect("q83v/ASN+Pn6/w==").unwrap();
        assert!(!input.is_file());
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = Input::detect(temp_dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(Input::detect("").unwrap_err().is_config());
    }
}
