//! Per-call options for transform and sync operations

use crate::crypto::{CipherConfig, IvMode, SecretKey};
use crate::error::EnvcryptResult;

/// Options accepted by every public operation
#[derive(Debug, Clone)]
pub struct EnvcryptOptions {
    /// Secret the cipher key is derived from
    pub secret_key: SecretKey,
    /// Explicit 16-byte IV; makes encryption deterministic
    pub iv: Option<String>,
    /// Fall back to the legacy fixed IV when no `iv` is given
    pub legacy_iv: bool,
    /// Skip persisting the output and only return the transformed value
    pub disable_write_file: bool,
    /// Overrides the default output file name
    pub enc_file_name: Option<String>,
}

impl EnvcryptOptions {
    /// Create options with the given secret and defaults for everything else
    pub fn new(secret_key: impl Into<SecretKey>) -> Self {
        Self {
            secret_key: secret_key.into(),
            iv: None,
            legacy_iv: false,
            disable_write_file: false,
            enc_file_name: None,
        }
    }

    /// Use an explicit IV
    pub fn with_iv(mut self, iv: impl Into<String>) -> Self {
        self.iv = Some(iv.into());
        self
    }

    /// Opt into the legacy fixed IV
    pub fn with_legacy_iv(mut self) -> Self {
        self.legacy_iv = true;
        self
    }

    /// Only return transformed values, never write them
    pub fn without_write(mut self) -> Self {
        self.disable_write_file = true;
        self
    }

    /// Override the output file name
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.enc_file_name = Some(name.into());
        self
    }

    /// The IV strategy these options select
    pub fn iv_mode(&self) -> IvMode {
        IvMode::from_options(self.iv.as_deref(), self.legacy_iv)
    }

    /// Build the cipher config for one call
    pub fn cipher_config(&self) -> EnvcryptResult<CipherConfig> {
        CipherConfig::new(self.secret_key.clone(), self.iv_mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EnvcryptOptions::new("k1");
        assert_eq!(options.iv_mode(), IvMode::Random);
        assert!(!options.disable_write_file);
        assert!(options.enc_file_name.is_none());
    }

    #[test]
    fn test_builder() {
        let options = EnvcryptOptions::new("k1")
            .with_iv("0123456789abcdef")
            .without_write()
            .with_file_name("prod.enc");

        assert_eq!(options.iv_mode(), IvMode::Fixed("0123456789abcdef".into()));
        assert!(options.disable_write_file);
        assert_eq!(options.enc_file_name.as_deref(), Some("prod.enc"));
    }

    #[test]
    fn test_cipher_config_rejects_empty_key() {
        assert!(EnvcryptOptions::new("").cipher_config().unwrap_err().is_config());
    }

    #[test]
    fn test_legacy_iv() {
        let options = EnvcryptOptions::new("k1").with_legacy_iv();
        assert_eq!(options.iv_mode(), IvMode::Legacy);
    }
}
