//! Error types for the client layer.

use latchkey_protocol::ProtocolError;
use latchkey_types::IdentityError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by client operations.
///
/// Security failures ([`ClientError::Protocol`] wrapping a bad signature
/// or clock skew) always abort the exchange and are never downgraded;
/// [`ClientError::Rejected`] is a semantic failure the caller may decide
/// to recover from.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connect, timeout, or body-read failure. Reported, never retried.
    #[error("network error: {0}")]
    Network(String),

    /// Envelope, freshness, or signature failure from the protocol layer.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server processed the request and rejected it.
    #[error("operation rejected: {message}")]
    Rejected {
        /// The server-provided reason.
        message: String,
    },

    /// A second handshake was attempted on the same session.
    #[error("the session has already been initialized")]
    AlreadyInitialized,

    /// An operation was attempted before a successful handshake.
    #[error("the session is not active; perform the handshake first")]
    NotInitialized,

    /// The server no longer accepts this client version.
    #[error("application version is no longer accepted by the server")]
    VersionMismatch {
        /// Download URL for the replacement build, when the owner set one.
        download: Option<String>,
    },

    /// The application is unknown to the server.
    #[error("the application does not exist")]
    AppNotFound,

    /// The application identity failed validation.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The host fingerprint could not be derived.
    #[error("host fingerprint unavailable: {0}")]
    Fingerprint(String),

    /// The credential token file could not be read.
    #[error("credential token unreadable: {0}")]
    Token(String),

    /// A link could not be handed to the system opener.
    #[error("failed to open link: {0}")]
    Link(String),
}

impl ClientError {
    /// Returns true for failures that mean the response cannot be
    /// trusted (tampering or a stale timestamp). These must never be
    /// treated as warnings.
    #[must_use]
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            ClientError::Protocol(ProtocolError::BadSignature)
                | ClientError::Protocol(ProtocolError::ClockSkew { .. })
        )
    }
}
