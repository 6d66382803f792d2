//! The entitlement client and its session lifecycle.
//!
//! One client owns one logical session. State transitions are
//! `Uninitialized → Active → Terminated`; a failed handshake moves
//! straight to `Terminated`, and re-handshaking a terminated session is
//! not permitted. Session state lives behind a `tokio::sync::RwLock`:
//! operations hold the read guard across the require-active check and
//! the network exchange, so an in-flight operation cannot race a
//! concurrent teardown, while independent operations still run
//! concurrently once the session is active.

use crate::config::ClientConfig;
use crate::device::{executable_checksum, HostFingerprint, SystemFingerprint};
use crate::error::{ClientError, ClientResult};
use crate::token::CredentialToken;
use crate::transport::SignedTransport;
use latchkey_protocol::{decode_reply, ServerReply};
use latchkey_types::{AppIdentity, Session, SessionState};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// How long a freshly minted session is given to settle server-side
/// before further requests are issued.
const NEW_SESSION_SETTLE: Duration = Duration::from_millis(100);

/// Client for the LatchKey entitlement service.
///
/// Routes every operation through the signed transport with the current
/// session id injected, and owns the session lifecycle.
pub struct EntitlementClient {
    transport: SignedTransport,
    session: RwLock<Session>,
    fingerprint: Box<dyn HostFingerprint>,
    token_path: Option<PathBuf>,
}

impl EntitlementClient {
    /// Creates a client using the system fingerprint provider.
    #[must_use]
    pub fn new(identity: AppIdentity, config: ClientConfig) -> Self {
        Self::with_fingerprint(identity, config, Box::new(SystemFingerprint))
    }

    /// Creates a client with a custom fingerprint provider.
    #[must_use]
    pub fn with_fingerprint(
        identity: AppIdentity,
        config: ClientConfig,
        fingerprint: Box<dyn HostFingerprint>,
    ) -> Self {
        let token_path = config.token_path.clone();
        Self {
            transport: SignedTransport::new(identity, config),
            session: RwLock::new(Session::new()),
            fingerprint,
            token_path,
        }
    }

    /// The identity this client presents to the server.
    #[must_use]
    pub fn identity(&self) -> &AppIdentity {
        self.transport.identity()
    }

    /// The current session lifecycle state.
    pub async fn session_state(&self) -> SessionState {
        self.session.read().await.state()
    }

    /// The server-issued session id while the session is active.
    pub async fn session_id(&self) -> Option<String> {
        self.session.read().await.id().map(str::to_owned)
    }

    /// Performs the initial signed exchange that establishes a session.
    ///
    /// Sends the application identity, a content fingerprint of the
    /// running executable, and, when a token file is configured, the
    /// credential token plus a digest of it.
    ///
    /// # Errors
    ///
    /// [`ClientError::AlreadyInitialized`] from any state other than
    /// `Uninitialized`; a handshake is never a retry. Server verdicts
    /// ([`ClientError::AppNotFound`], [`ClientError::VersionMismatch`],
    /// [`ClientError::Rejected`]) terminate the session; transport and
    /// verification failures leave it untouched.
    pub async fn handshake(&self) -> ClientResult<()> {
        let mut session = self.session.write().await;
        if session.state() != SessionState::Uninitialized {
            return Err(ClientError::AlreadyInitialized);
        }

        let checksum = executable_checksum();
        let token = match &self.token_path {
            Some(path) => Some(CredentialToken::load(path)?),
            None => None,
        };

        let mut fields: Vec<(&str, &str)> = vec![
            ("ver", self.identity().version()),
            ("hash", checksum.as_str()),
        ];
        if let Some(token) = &token {
            fields.push(("token", token.raw()));
            fields.push(("thash", token.digest_hex()));
        }

        let body = self.transport.send("init", None, &fields).await?;
        match decode_reply(&body)? {
            ServerReply::AppNotFound => {
                session.terminate();
                Err(ClientError::AppNotFound)
            }
            ServerReply::VersionMismatch { download } => {
                session.terminate();
                Err(ClientError::VersionMismatch { download })
            }
            ServerReply::Failure { message } => {
                session.terminate();
                Err(ClientError::Rejected { message })
            }
            ServerReply::Success {
                new_session,
                ref fields,
                ..
            } => {
                let Some(session_id) = fields.get("sessionid").and_then(|v| v.as_str()) else {
                    return Err(latchkey_protocol::ProtocolError::MalformedEnvelope(
                        "handshake reply is missing the session id".to_string(),
                    )
                    .into());
                };

                session.activate(session_id);
                info!("session established");

                if new_session {
                    // Let the just-issued session settle server-side.
                    tokio::time::sleep(NEW_SESSION_SETTLE).await;
                }
                Ok(())
            }
        }
    }

    /// Guard called before every non-handshake operation.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotInitialized`] from any state other than
    /// `Active`; no network call is made.
    pub async fn require_active(&self) -> ClientResult<()> {
        if self.session.read().await.is_active() {
            Ok(())
        } else {
            Err(ClientError::NotInitialized)
        }
    }

    /// Ends the session locally. Idempotent; no network call.
    pub async fn terminate(&self) {
        self.session.write().await.terminate();
        debug!("session terminated");
    }

    /// Tells the server to end the session, then terminates it locally.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotInitialized`] when no session is active, or
    /// [`ClientError::Rejected`] when the server refuses, in which case
    /// the local state is left untouched.
    pub async fn logout(&self) -> ClientResult<()> {
        let mut session = self.session.write().await;
        let session_id = session
            .id()
            .map(str::to_owned)
            .ok_or(ClientError::NotInitialized)?;

        let body = self.transport.send("logout", Some(&session_id), &[]).await?;
        match decode_reply(&body)? {
            ServerReply::Success { .. } => {
                session.terminate();
                info!("logged out");
                Ok(())
            }
            ServerReply::Failure { message } => Err(ClientError::Rejected { message }),
            ServerReply::AppNotFound => Err(ClientError::AppNotFound),
            ServerReply::VersionMismatch { download } => {
                Err(ClientError::VersionMismatch { download })
            }
        }
    }

    /// Routes one non-handshake operation through the signed transport
    /// with the session id injected, holding the session read guard
    /// across the exchange.
    pub(crate) async fn dispatch(
        &self,
        operation: &str,
        fields: &[(&str, &str)],
    ) -> ClientResult<ServerReply> {
        let session = self.session.read().await;
        let session_id = session.id().ok_or(ClientError::NotInitialized)?;

        let body = self.transport.send(operation, Some(session_id), fields).await?;
        Ok(decode_reply(&body)?)
    }

    /// Derives the host fingerprint for operations that bind to it.
    pub(crate) fn host_fingerprint(&self) -> ClientResult<String> {
        self.fingerprint.fingerprint()
    }
}
