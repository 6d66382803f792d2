//! Shared test helpers for protocol tests.

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use latchkey_protocol::SignedEnvelope;

/// Returns a deterministic Ed25519 signing key and the hex-encoded
/// public key it verifies against.
pub fn test_keypair() -> (SigningKey, String) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let public_hex = hex::encode(signing_key.verifying_key().to_bytes());
    (signing_key, public_hex)
}

/// Signs `timestamp || body` the way the server does, returning the
/// hex-encoded detached signature.
pub fn sign_message(signing_key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key.sign(&message).to_bytes())
}

/// Builds a validly signed envelope for the given timestamp and body.
pub fn signed_envelope(signing_key: &SigningKey, timestamp: &str, body: &[u8]) -> SignedEnvelope {
    let signature = sign_message(signing_key, timestamp, body);
    SignedEnvelope::from_parts(body.to_vec(), Some(&signature), Some(timestamp)).unwrap()
}
