//! Ed25519 signature verification with a freshness gate.
//!
//! The signed message is the exact byte concatenation of the raw
//! timestamp header string followed by the raw response body. The
//! freshness gate runs before verification is attempted: a stale
//! response is rejected even if its signature is valid, bounding the
//! replay window.

use crate::envelope::SignedEnvelope;
use crate::error::{ProtocolError, ProtocolResult};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Allowance for network transit time, in seconds.
pub const NETWORK_BUFFER_SECS: i64 = 5;

/// Allowance for local clock drift, in seconds.
pub const CLOCK_DRIFT_SECS: i64 = 20;

/// Total tolerated |local - server| difference, in seconds.
pub const FRESHNESS_WINDOW_SECS: i64 = NETWORK_BUFFER_SECS + CLOCK_DRIFT_SECS;

/// Checks that a response timestamp falls within the freshness window
/// around `now_secs`.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedTimestamp`] for a non-integer
/// timestamp and [`ProtocolError::ClockSkew`] when the difference
/// exceeds [`FRESHNESS_WINDOW_SECS`].
pub fn check_freshness_at(timestamp: &str, now_secs: i64) -> ProtocolResult<()> {
    let server_secs = timestamp
        .parse::<i64>()
        .map_err(|_| ProtocolError::MalformedTimestamp(timestamp.to_string()))?;

    let skew_secs = (now_secs - server_secs).abs();
    if skew_secs > FRESHNESS_WINDOW_SECS {
        return Err(ProtocolError::ClockSkew {
            skew_secs,
            window_secs: FRESHNESS_WINDOW_SECS,
        });
    }

    Ok(())
}

/// Verifies the detached signature over `timestamp || body`.
///
/// Pure and stateless. Any hex or key-shape decode failure counts as
/// verification failure rather than an error.
#[must_use]
pub fn verify_signature(
    body: &[u8],
    signature_hex: &str,
    timestamp: &str,
    public_key_hex: &str,
) -> bool {
    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };

    let Ok(key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    verifying_key.verify(&message, &signature).is_ok()
}

/// Runs the freshness gate and signature check against an envelope,
/// evaluated at `now_secs`.
///
/// # Errors
///
/// Returns the freshness errors from [`check_freshness_at`] or
/// [`ProtocolError::BadSignature`] when the signature does not verify.
pub fn verify_envelope_at(
    envelope: &SignedEnvelope,
    public_key_hex: &str,
    now_secs: i64,
) -> ProtocolResult<()> {
    check_freshness_at(envelope.timestamp(), now_secs)?;

    if !verify_signature(
        envelope.body(),
        envelope.signature_hex(),
        envelope.timestamp(),
        public_key_hex,
    ) {
        return Err(ProtocolError::BadSignature);
    }

    Ok(())
}

/// Verifies an envelope against the current wall clock.
///
/// # Errors
///
/// See [`verify_envelope_at`].
pub fn verify_envelope(envelope: &SignedEnvelope, public_key_hex: &str) -> ProtocolResult<()> {
    verify_envelope_at(envelope, public_key_hex, chrono::Utc::now().timestamp())
}
