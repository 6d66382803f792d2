//! Client configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Production API endpoint.
const DEFAULT_API_URL: &str = "https://latchkey.dev/api/1.3/";

/// Embedded hex-encoded Ed25519 public key for response verification.
/// Fixed and out-of-band; not rotated at runtime.
const VERIFYING_KEY_HEX: &str = "c87587875a25b6561d869d03ddb5b1d296cdd0cba576e73c6fe18a2160a05087";

/// Configuration for the signed transport.
///
/// The defaults target the production service; tests point `api_url` and
/// `verifying_key_hex` at a local mock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL requests are POSTed to.
    pub api_url: String,
    /// Hex-encoded Ed25519 public key responses are verified against.
    pub verifying_key_hex: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Where the audit trail is appended, or `None` to disable it.
    pub audit_log_path: Option<PathBuf>,
    /// Optional credential token file forwarded during the handshake.
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            verifying_key_hex: VERIFYING_KEY_HEX.to_string(),
            timeout_secs: 10,
            audit_log_path: dirs::data_local_dir()
                .map(|dir| dir.join("latchkey").join("audit.log")),
            token_path: None,
        }
    }
}
