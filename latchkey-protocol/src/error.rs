//! Error types for the protocol layer.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while verifying or decoding a server response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The response is missing its signature or timestamp header.
    #[error("response is missing the signature or timestamp header")]
    MissingSignature,

    /// The timestamp header is not a decimal Unix timestamp.
    #[error("malformed timestamp header: {0}")]
    MalformedTimestamp(String),

    /// The response timestamp is outside the freshness window.
    #[error(
        "clock skew of {skew_secs}s exceeds the {window_secs}s freshness window; \
         check the system clock"
    )]
    ClockSkew {
        /// Observed |local - server| difference in seconds.
        skew_secs: i64,
        /// The tolerated window in seconds.
        window_secs: i64,
    },

    /// Signature verification failed; the response cannot be trusted.
    #[error("response signature verification failed; the reply was tampered with or the session ended")]
    BadSignature,

    /// The JSON body does not have the required envelope shape.
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// A hex-encoded payload field failed to decode.
    #[error("invalid hex encoding in payload: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),
}
