//! Signed envelope verification and response decoding.
//!
//! This crate is the pure half of the LatchKey transport: it never touches
//! the network. It covers:
//! - Parsing the detached-signature envelope from response headers + body
//! - Ed25519 verification over `timestamp || body` with a freshness gate
//! - Defensive decoding of the server's loosely-typed JSON payloads
//! - Redaction of sensitive fields and the append-only audit trail
//!
//! The networked half (`latchkey-client`) routes every exchange through
//! these functions before any payload is trusted.

mod audit;
mod decode;
mod envelope;
mod error;
mod redact;
mod verify;

pub use audit::{AuditEntry, AuditLog, MAX_AUDITED_BODY_BYTES};
pub use decode::{
    decode_app_info, decode_file_contents, decode_reply, decode_string_list, decode_user_info,
    ServerReply, APP_NOT_FOUND_SENTINEL, VERSION_MISMATCH_MESSAGE,
};
pub use envelope::SignedEnvelope;
pub use error::{ProtocolError, ProtocolResult};
pub use redact::{redact, redact_body, REDACTED};
pub use verify::{
    check_freshness_at, verify_envelope, verify_envelope_at, verify_signature,
    CLOCK_DRIFT_SECS, FRESHNESS_WINDOW_SECS, NETWORK_BUFFER_SECS,
};
