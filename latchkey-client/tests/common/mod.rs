//! Shared test helpers for client tests.
//!
//! Responses are signed with a deterministic Ed25519 key pair the same
//! way the production server signs: over `timestamp || body`, with the
//! signature and timestamp carried in the two response headers.

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use latchkey_client::{ClientConfig, ClientResult, EntitlementClient, HostFingerprint};
use latchkey_types::AppIdentity;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session id issued by [`activated_client`].
pub const TEST_SESSION_ID: &str = "sess-1";

/// Fingerprint reported by [`FixedFingerprint`].
pub const TEST_HWID: &str = "test-hwid";

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

/// A validly signed response template stamped with the current time.
pub fn signed_response(signing_key: &SigningKey, body: &str) -> ResponseTemplate {
    signed_response_at(signing_key, body, chrono::Utc::now().timestamp())
}

/// A validly signed response template with an arbitrary timestamp.
pub fn signed_response_at(
    signing_key: &SigningKey,
    body: &str,
    timestamp_secs: i64,
) -> ResponseTemplate {
    let timestamp = timestamp_secs.to_string();
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    let signature = hex::encode(signing_key.sign(&message).to_bytes());

    ResponseTemplate::new(200)
        .insert_header("x-signature-ed25519", signature.as_str())
        .insert_header("x-signature-timestamp", timestamp.as_str())
        .set_body_raw(body.as_bytes().to_vec(), "application/json")
}

/// The identity used across the client tests.
pub fn test_identity() -> AppIdentity {
    AppIdentity::new("App", "0123456789", "1.0").unwrap()
}

/// A config pointing at the mock server, audit trail disabled.
pub fn test_config(server: &MockServer, public_key_hex: &str) -> ClientConfig {
    ClientConfig {
        api_url: server.uri(),
        verifying_key_hex: public_key_hex.to_string(),
        timeout_secs: 5,
        audit_log_path: None,
        token_path: None,
    }
}

/// Fingerprint provider that always reports [`TEST_HWID`].
pub struct FixedFingerprint;

impl HostFingerprint for FixedFingerprint {
    fn fingerprint(&self) -> ClientResult<String> {
        Ok(TEST_HWID.to_string())
    }
}

/// A client wired to the mock server with the fixed fingerprint.
pub fn test_client(server: &MockServer, public_key_hex: &str) -> EntitlementClient {
    test_client_with_config(test_config(server, public_key_hex))
}

/// Same, with a caller-supplied config.
pub fn test_client_with_config(config: ClientConfig) -> EntitlementClient {
    EntitlementClient::with_fingerprint(test_identity(), config, Box::new(FixedFingerprint))
}

/// Mounts a handshake mock and returns a client already in the active
/// state with [`TEST_SESSION_ID`].
pub async fn activated_client(
    server: &MockServer,
    signing_key: &SigningKey,
    public_key_hex: &str,
) -> EntitlementClient {
    Mock::given(method("POST"))
        .and(body_string_contains("type=init"))
        .respond_with(signed_response(
            signing_key,
            &format!(r#"{{"success":true,"message":"Initialized","sessionid":"{TEST_SESSION_ID}"}}"#),
        ))
        .mount(server)
        .await;

    let client = test_client(server, public_key_hex);
    client.handshake().await.unwrap();
    client
}
