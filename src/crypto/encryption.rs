//! AES-256-GCM encryption/decryption of text payloads
//!
//! The cipher runs with a 128-bit nonce taken verbatim from the caller's IV,
//! so the same key, IV and plaintext always produce the same ciphertext.
//! Key bytes are the SHA-256 digest of the secret string.

use aes_gcm::{
    aead::{consts::U16, Aead, KeyInit},
    aes::Aes256,
    AesGcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{EnvcryptError, EnvcryptResult};

/// Size of the initialization vector in bytes (128 bits)
pub const IV_SIZE: usize = 16;

/// Size of the GCM authentication tag appended to every ciphertext
pub(crate) const TAG_SIZE: usize = 16;

/// AES-256-GCM with a 16-byte nonce
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypt a plaintext string
///
/// Returns the standard base64 encoding of `ciphertext || tag`.
pub fn encrypt(key: &str, iv: &str, plaintext: &str) -> EnvcryptResult<String> {
    let iv = parse_iv(iv)?;
    let ciphertext = encrypt_raw(key, &iv, plaintext.as_bytes())?;
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypt a string produced by [`encrypt`] with the same key and IV
pub fn decrypt(key: &str, iv: &str, ciphertext: &str) -> EnvcryptResult<String> {
    let iv = parse_iv(iv)?;
    let data = decode_payload(ciphertext)?;
    let plaintext = decrypt_raw(key, &iv, &data)?;
    into_utf8(plaintext)
}

/// Check that an IV string has the shape the cipher needs
pub(crate) fn parse_iv(iv: &str) -> EnvcryptResult<[u8; IV_SIZE]> {
    let bytes = iv.as_bytes();
    if bytes.len() != IV_SIZE {
        return Err(EnvcryptError::Crypto(format!(
            "Invalid IV length: expected {} bytes, got {}",
            IV_SIZE,
            bytes.len()
        )));
    }

    let mut out = [0u8; IV_SIZE];
    out.copy_from_slice(bytes);
    Ok(out)
}

pub(crate) fn encrypt_raw(
    key: &str,
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> EnvcryptResult<Vec<u8>> {
    let cipher = build_cipher(key)?;
    cipher
        .encrypt(Nonce::<U16>::from_slice(iv), plaintext)
        .map_err(|e| EnvcryptError::Crypto(format!("Encryption failed: {}", e)))
}

pub(crate) fn decrypt_raw(key: &str, iv: &[u8; IV_SIZE], data: &[u8]) -> EnvcryptResult<Vec<u8>> {
    if data.len() < TAG_SIZE {
        return Err(EnvcryptError::Crypto(format!(
            "Ciphertext too short: expected at least {} bytes, got {}",
            TAG_SIZE,
            data.len()
        )));
    }

    let cipher = build_cipher(key)?;
    cipher
        .decrypt(Nonce::<U16>::from_slice(iv), data)
        .map_err(|_| {
            EnvcryptError::Crypto(
                "Decryption failed: invalid key, IV or corrupted data".to_string(),
            )
        })
}

/// Decode the base64 text of a ciphertext payload
///
/// Surrounding whitespace is ignored so files edited by hand still decode.
pub(crate) fn decode_payload(ciphertext: &str) -> EnvcryptResult<Vec<u8>> {
    STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| EnvcryptError::Crypto(format!("Invalid ciphertext encoding: {}", e)))
}

pub(crate) fn into_utf8(plaintext: Vec<u8>) -> EnvcryptResult<String> {
    String::from_utf8(plaintext)
        .map_err(|e| EnvcryptError::Crypto(format!("Invalid UTF-8 in decrypted data: {}", e)))
}

fn build_cipher(key: &str) -> EnvcryptResult<Aes256Gcm16> {
    if key.is_empty() {
        return Err(EnvcryptError::Crypto("Secret key must not be empty".to_string()));
    }

    let digest = Sha256::digest(key.as_bytes());
    let mut key_bytes = Zeroizing::new([0u8; 32]);
    key_bytes.copy_from_slice(digest.as_slice());

    Aes256Gcm16::new_from_slice(&key_bytes[..])
        .map_err(|e| EnvcryptError::Crypto(format!("Failed to create cipher: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "k1";
    const IV: &str = "0123456789abcdef";

    #[test]
    fn test_encrypt_decrypt() {
        let encrypted = encrypt(KEY, IV, "A=1\nB=2").unwrap();
        let decrypted = decrypt(KEY, IV, &encrypted).unwrap();

        assert_eq!(decrypted, "A=1\nB=2");
    }

    #[test]
    fn test_encrypt_is_deterministic() {
        let first = encrypt(KEY, IV, "API_TOKEN=abc123").unwrap();
        let second = encrypt(KEY, IV, "API_TOKEN=abc123").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ciphertext_is_text_safe() {
        let encrypted = encrypt(KEY, IV, "LINE1=a\r\nLINE2=b\n\0binary").unwrap();

        assert!(!encrypted.contains('\n'));
        assert!(!encrypted.contains('\r'));
        assert!(encrypted.is_ascii());
    }

    #[test]
    fn test_different_iv_different_ciphertext() {
        let first = encrypt(KEY, IV, "SECRET=1").unwrap();
        let second = encrypt(KEY, "fedcba9876543210", "SECRET=1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt(KEY, IV, "SECRET=1").unwrap();
        let result = decrypt("k2", IV, &encrypted);

        assert!(result.unwrap_err().is_crypto());
    }

    #[test]
    fn test_wrong_iv_fails() {
        let encrypted = encrypt(KEY, IV, "SECRET=1").unwrap();
        let result = decrypt(KEY, "fedcba9876543210", &encrypted);

        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let encrypted = encrypt(KEY, IV, "DATABASE_URL=postgres://localhost").unwrap();
        let bytes = STANDARD.decode(&encrypted).unwrap();

        for i in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let result = decrypt(KEY, IV, &STANDARD.encode(&tampered));
            assert!(result.unwrap_err().is_crypto(), "flip at byte {} went unnoticed", i);
        }
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let encrypted = encrypt(KEY, IV, "SECRET=1").unwrap();
        let bytes = STANDARD.decode(&encrypted).unwrap();
        let truncated = STANDARD.encode(&bytes[..TAG_SIZE - 1]);

        let err = decrypt(KEY, IV, &truncated).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_invalid_encoding_fails() {
        let err = decrypt(KEY, IV, "not base64 at all!").unwrap_err();
        assert!(err.is_crypto());
    }

    #[test]
    fn test_trailing_newline_is_ignored() {
        let encrypted = encrypt(KEY, IV, "A=1").unwrap();
        let decrypted = decrypt(KEY, IV, &format!("{}\n", encrypted)).unwrap();

        assert_eq!(decrypted, "A=1");
    }

    #[test]
    fn test_invalid_iv_length() {
        let err = encrypt(KEY, "short", "A=1").unwrap_err();
        assert!(err.is_crypto());
        assert!(err.to_string().contains("expected 16 bytes, got 5"));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(encrypt("", IV, "A=1").unwrap_err().is_crypto());
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt(KEY, IV, "").unwrap();
        assert_eq!(decrypt(KEY, IV, &encrypted).unwrap(), "");
    }

    #[test]
    fn test_unicode_and_large_plaintext() {
        let plaintext: String = (0..2000).map(|i| format!("KEY_{}=välue✓{}\n", i, i)).collect();

        let encrypted = encrypt(KEY, IV, &plaintext).unwrap();
        assert_eq!(decrypt(KEY, IV, &encrypted).unwrap(), plaintext);
    }
}
