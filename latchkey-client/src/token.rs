//! Credential token loading.
//!
//! A long-lived credential token lives in a local file managed outside
//! the core. The handshake forwards the raw token verbatim together with
//! a SHA-256 digest of its bytes.

use crate::error::{ClientError, ClientResult};
use sha2::{Digest, Sha256};
use std::path::Path;

/// A credential token read from disk, plus its digest.
#[derive(Debug, Clone)]
pub struct CredentialToken {
    raw: String,
    digest_hex: String,
}

impl CredentialToken {
    /// Reads the token file and computes the digest over its exact bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Token`] when the file cannot be read.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::Token(format!("{}: {e}", path.display())))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest_hex = hex::encode(hasher.finalize());

        Ok(Self {
            raw: String::from_utf8_lossy(&bytes).into_owned(),
            digest_hex,
        })
    }

    /// The token contents, forwarded verbatim.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Hex SHA-256 digest of the token bytes.
    #[must_use]
    pub fn digest_hex(&self) -> &str {
        &self.digest_hex
    }
}
