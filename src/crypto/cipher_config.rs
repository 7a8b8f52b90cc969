//! Per-call cipher configuration
//!
//! A [`CipherConfig`] pairs the secret key with an IV strategy. Fresh random
//! IVs are the default; a caller-supplied IV or the legacy fixed constant make
//! encryption deterministic.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::encryption::{self, IV_SIZE, TAG_SIZE};
use super::SecretKey;
use crate::error::{EnvcryptError, EnvcryptResult};

/// The well-known IV used by earlier releases when none was supplied
pub const DEFAULT_IV: &str = "envcrypt-iv-v001";

/// How the initialization vector is chosen for each encryption
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IvMode {
    /// Generate a fresh IV per encryption and store it in the payload
    #[default]
    Random,
    /// Use the given 16-byte IV for every encryption
    Fixed(String),
    /// Use [`DEFAULT_IV`] for every encryption
    Legacy,
}

impl IvMode {
    /// Pick the mode from the optional `iv` and `legacy_iv` caller options
    ///
    /// An explicit IV takes precedence over the legacy flag.
    pub fn from_options(iv: Option<&str>, legacy_iv: bool) -> Self {
        match iv {
            Some(iv) if !iv.is_empty() => Self::Fixed(iv.to_string()),
            _ if legacy_iv => Self::Legacy,
            _ => Self::Random,
        }
    }

    /// The IV string used by deterministic modes
    fn fixed_iv(&self) -> Option<&str> {
        match self {
            Self::Random => None,
            Self::Fixed(iv) => Some(iv.as_str()),
            Self::Legacy => Some(DEFAULT_IV),
        }
    }

    /// Check if encryption under this mode is deterministic
    pub fn is_deterministic(&self) -> bool {
        self.fixed_iv().is_some()
    }
}

/// Key and IV strategy for one encrypt or decrypt call
#[derive(Debug, Clone)]
pub struct CipherConfig {
    key: SecretKey,
    iv: IvMode,
}

impl CipherConfig {
    /// Create a new config
    ///
    /// Fails with a configuration error for an empty key and with a crypto
    /// error when a fixed IV is not exactly [`IV_SIZE`] bytes.
    pub fn new(key: impl Into<SecretKey>, iv: IvMode) -> EnvcryptResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(EnvcryptError::Config("Secret key should be provided".into()));
        }

        if let Some(iv) = iv.fixed_iv() {
            encryption::parse_iv(iv)?;
        }

        if iv == IvMode::Legacy {
            tracing::warn!("Using the legacy fixed IV; identical inputs will produce identical ciphertexts");
        }

        Ok(Self { key, iv })
    }

    /// Get the secret key
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Get the IV mode
    pub fn iv_mode(&self) -> &IvMode {
        &self.iv
    }

    /// Encrypt a plaintext payload under this config
    pub fn seal(&self, plaintext: &str) -> EnvcryptResult<String> {
        match self.iv.fixed_iv() {
            Some(iv) => encryption::encrypt(&self.key, iv, plaintext),
            None => {
                let mut iv = [0u8; IV_SIZE];
                OsRng.fill_bytes(&mut iv);

                let ciphertext = encryption::encrypt_raw(&self.key, &iv, plaintext.as_bytes())?;
                let mut payload = Vec::with_capacity(IV_SIZE + ciphertext.len());
                payload.extend_from_slice(&iv);
                payload.extend_from_slice(&ciphertext);

                Ok(STANDARD.encode(payload))
            }
        }
    }

    /// Decrypt a payload produced by [`CipherConfig::seal`]
    pub fn open(&self, ciphertext: &str) -> EnvcryptResult<String> {
        match self.iv.fixed_iv() {
            Some(iv) => encryption::decrypt(&self.key, iv, ciphertext),
            None => {
                let payload = encryption::decode_payload(ciphertext)?;
                if payload.len() < IV_SIZE + TAG_SIZE {
                    return Err(EnvcryptError::Crypto(format!(
                        "Ciphertext too short: expected at least {} bytes, got {}",
                        IV_SIZE + TAG_SIZE,
                        payload.len()
                    )));
                }

                let (iv_bytes, data) = payload.split_at(IV_SIZE);
                let mut iv = [0u8; IV_SIZE];
                iv.copy_from_slice(iv_bytes);

                let plaintext = encryption::decrypt_raw(&self.key, &iv, data)?;
                encryption::into_utf8(plaintext)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_iv_shape() {
        assert_eq!(DEFAULT_IV.len(), IV_SIZE);
    }

    #[test]
    fn test_iv_mode_from_options() {
        assert_eq!(IvMode::from_options(None, false), IvMode::Random);
        assert_eq!(IvMode::from_options(Some(""), false), IvMode::Random);
        assert_eq!(IvMode::from_options(None, true), IvMode::Legacy);
        assert_eq!(
            IvMode::from_options(Some("0123456789abcdef"), true),
            IvMode::Fixed("0123456789abcdef".into())
        );
    }

    #[test]
    fn test_empty_key_is_config_error() {
        let err = CipherConfig::new("", IvMode::Random).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_bad_fixed_iv_is_crypto_error() {
        let err = CipherConfig::new("k1", IvMode::Fixed("too-short".into())).unwrap_err();
        assert!(err.is_crypto());
    }

    #[test]
    fn test_random_iv_round_trip() {
        let config = CipherConfig::new("k1", IvMode::Random).unwrap();

        let first = config.seal("A=1\nB=2").unwrap();
        let second = config.seal("A=1\nB=2").unwrap();

        assert_ne!(first, second);
        assert_eq!(config.open(&first).unwrap(), "A=1\nB=2");
        assert_eq!(config.open(&second).unwrap(), "A=1\nB=2");
    }

    #[test]
    fn test_fixed_iv_matches_engine() {
        let config = CipherConfig::new("k1", IvMode::Fixed("0123456789abcdef".into())).unwrap();

        let sealed = config.seal("A=1").unwrap();
        assert_eq!(sealed, encryption::encrypt("k1", "0123456789abcdef", "A=1").unwrap());
        assert_eq!(config.open(&sealed).unwrap(), "A=1");
    }

    #[test]
    fn test_legacy_iv_is_deterministic() {
        let config = CipherConfig::new("k1", IvMode::Legacy).unwrap();

        assert!(config.iv_mode().is_deterministic());
        assert_eq!(config.seal("A=1").unwrap(), config.seal("A=1").unwrap());
    }

    #[test]
    fn test_random_open_rejects_short_payload() {
        let config = CipherConfig::new("k1", IvMode::Random).unwrap();
        let short = STANDARD.encode([0u8; IV_SIZE]);

        assert!(config.open(&short).unwrap_err().is_crypto());
    }

    #[test]
    fn test_random_open_rejects_wrong_key() {
        let sealed = CipherConfig::new("k1", IvMode::Random).unwrap().seal("A=1").unwrap();
        let other = CipherConfig::new("k2", IvMode::Random).unwrap();

        assert!(other.open(&sealed).is_err());
    }
}
