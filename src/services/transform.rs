//! Single-item transforms
//!
//! Encrypts or decrypts one input, either a file or literal text, and
//! optionally writes the result next to the caller's output directory.

use std::path::Path;

use super::{Envcrypt, Input};
use crate::config::EnvcryptOptions;
use crate::crypto::CipherConfig;
use crate::error::{EnvcryptError, EnvcryptResult};
use crate::storage::{read_text, resolve_path, FileWriter, PendingWrite};

/// Direction of a single-item transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Encrypt,
    Decrypt,
}

impl TransformKind {
    /// Output file name used when the caller doesn't override it
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Encrypt => "out.enc",
            Self::Decrypt => ".env",
        }
    }

    fn apply(self, cipher: &CipherConfig, payload: &str) -> EnvcryptResult<String> {
        match self {
            Self::Encrypt => cipher.seal(payload),
            Self::Decrypt => cipher.open(payload),
        }
    }
}

/// Result of a single-item transform
///
/// The value is available immediately. When the input was a file and writing
/// was enabled, `write` tracks the output file being persisted.
#[derive(Debug)]
pub struct Transformed {
    value: String,
    write: Option<PendingWrite>,
}

impl Transformed {
    /// The encrypted or decrypted text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The in-flight output write, if one was started
    pub fn pending_write(&self) -> Option<&PendingWrite> {
        self.write.as_ref()
    }

    /// Split into the value and the pending write
    pub fn into_parts(self) -> (String, Option<PendingWrite>) {
        (self.value, self.write)
    }

    /// Wait for the output write (if any) and return the value
    pub async fn persist(self) -> EnvcryptResult<String> {
        if let Some(write) = self.write {
            write.wait().await?;
        }
        Ok(self.value)
    }
}

impl<W: FileWriter> Envcrypt<W> {
    /// Encrypt a `.env` file or a literal value
    ///
    /// File inputs are written to `output_path/<file name>` (default
    /// `out.enc`) unless `disable_write_file` is set. Starting that write
    /// needs a tokio runtime; without one the call returns
    /// [`EnvcryptError::Runtime`].
    pub fn to_encrypted_form(
        &self,
        input: &str,
        options: &EnvcryptOptions,
        output_path: Option<&Path>,
    ) -> EnvcryptResult<Transformed> {
        self.transform(TransformKind::Encrypt, input, options, output_path)
    }

    /// Decrypt an encrypted file or a literal ciphertext
    ///
    /// File inputs are written to `output_path/<file name>` (default `.env`)
    /// unless `disable_write_file` is set. Starting that write needs a tokio
    /// runtime, as for [`Envcrypt::to_encrypted_form`].
    pub fn to_plaintext_form(
        &self,
        input: &str,
        options: &EnvcryptOptions,
        output_path: Option<&Path>,
    ) -> EnvcryptResult<Transformed> {
        self.transform(TransformKind::Decrypt, input, options, output_path)
    }

    /// Validate the call, classify the input, then transform it
    ///
    /// Every configuration problem is reported before the filesystem is touched.
    pub fn transform(
        &self,
        kind: TransformKind,
        input: &str,
        options: &EnvcryptOptions,
        output_path: Option<&Path>,
    ) -> EnvcryptResult<Transformed> {
        if options.secret_key.is_empty() {
            return Err(EnvcryptError::Config("Secret key should be provided".into()));
        }

        if input.is_empty() {
            return Err(EnvcryptError::Config(
                "Input path or value should be provided".into(),
            ));
        }

        if !options.disable_write_file && output_path.is_none() {
            return Err(EnvcryptError::Config(
                "Output path should be provided when writing the output file".into(),
            ));
        }

        let cipher = options.cipher_config()?;
        let input = Input::detect(input)?;

        self.transform_input(kind, input, &cipher, options, output_path)
    }

    /// Transform an already classified input
    pub fn transform_input(
        &self,
        kind: TransformKind,
        input: Input,
        cipher: &CipherConfig,
        options: &EnvcryptOptions,
        output_path: Option<&Path>,
    ) -> EnvcryptResult<Transformed> {
        let path = match input {
            Input::FromLiteral(text) => {
                return Ok(Transformed {
                    value: kind.apply(cipher, &text)?,
                    write: None,
                });
            }
            Input::FromFile(path) => path,
        };

        let content = read_text(&path)?;
        let value = kind.apply(cipher, &content)?;

        let write = match output_path {
            Some(dir) if !options.disable_write_file => {
                let dir = resolve_path(dir)?;
                let name = options
                    .enc_file_name
                    .as_deref()
                    .unwrap_or(kind.default_file_name());
                Some(self.writer.write_file_safely(&dir, value.clone(), Some(name))?)
            }
            _ => None,
        };

        Ok(Transformed { value, write })
    }
}
