//! Session lifecycle state.
//!
//! A session is issued by the server during the handshake and injected
//! into every subsequent request. The state machine is
//! `Uninitialized → Active → Terminated`; a failed handshake moves
//! straight from `Uninitialized` to `Terminated`.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a server session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No handshake has been attempted yet.
    Uninitialized,
    /// Handshake succeeded; the session id is valid.
    Active,
    /// The session has ended and cannot be revived.
    Terminated,
}

/// A server-issued session and its lifecycle state.
///
/// The session id is opaque and meaningless unless the state is
/// [`SessionState::Active`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    state: SessionState,
    session_id: Option<String>,
}

impl Session {
    /// Creates a fresh, uninitialized session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            session_id: None,
        }
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The session id, present only while the session is active.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self.state {
            SessionState::Active => self.session_id.as_deref(),
            _ => None,
        }
    }

    /// Whether the session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Marks the session active with the server-issued id.
    pub fn activate(&mut self, session_id: impl Into<String>) {
        self.state = SessionState::Active;
        self.session_id = Some(session_id.into());
    }

    /// Ends the session. Idempotent; the id is discarded.
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
        self.session_id = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
