//! The detached-signature envelope carried by every server response.

use crate::error::{ProtocolError, ProtocolResult};

/// A raw server response paired with its detached signature headers.
///
/// Ephemeral: constructed from one HTTP exchange, verified, then dropped.
/// The timestamp is kept as the raw header string because the signed
/// message is the exact byte concatenation `timestamp || body`.
#[derive(Debug, Clone)]
pub struct SignedEnvelope {
    body: Vec<u8>,
    signature_hex: String,
    timestamp: String,
}

impl SignedEnvelope {
    /// Builds an envelope from the response body and its two headers.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingSignature`] if either header is
    /// absent or empty.
    pub fn from_parts(
        body: Vec<u8>,
        signature_hex: Option<&str>,
        timestamp: Option<&str>,
    ) -> ProtocolResult<Self> {
        let signature_hex = match signature_hex {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => return Err(ProtocolError::MissingSignature),
        };
        let timestamp = match timestamp {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(ProtocolError::MissingSignature),
        };

        Ok(Self {
            body,
            signature_hex,
            timestamp,
        })
    }

    /// The raw response body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The hex-encoded detached signature.
    #[must_use]
    pub fn signature_hex(&self) -> &str {
        &self.signature_hex
    }

    /// The raw timestamp header string.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The timestamp parsed as decimal Unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedTimestamp`] if the header is not
    /// a decimal integer.
    pub fn timestamp_secs(&self) -> ProtocolResult<i64> {
        self.timestamp
            .parse::<i64>()
            .map_err(|_| ProtocolError::MalformedTimestamp(self.timestamp.clone()))
    }

    /// Consumes the envelope, returning the body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
