//! Stable records decoded from server payloads.
//!
//! The server's JSON is loosely typed; the decoder in `latchkey-protocol`
//! fills these records opportunistically. Cosmetic fields that fail to
//! decode become [`UNKNOWN_FIELD`] instead of aborting the whole record.

use serde::{Deserialize, Serialize};

/// Sentinel used for cosmetic fields the server omitted or mistyped.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Aggregate application statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Total registered users.
    pub num_users: String,
    /// Users currently online.
    pub num_online_users: String,
    /// Total license keys issued.
    pub num_keys: String,
    /// URL of the customer panel.
    pub customer_panel_url: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            num_users: UNKNOWN_FIELD.to_string(),
            num_online_users: UNKNOWN_FIELD.to_string(),
            num_keys: UNKNOWN_FIELD.to_string(),
            customer_panel_url: UNKNOWN_FIELD.to_string(),
        }
    }
}

/// A single subscription attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription (tier) name.
    pub name: String,
    /// Expiry timestamp as reported by the server.
    pub expiry: String,
}

/// The authenticated user's account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Account username.
    pub username: String,
    /// IP address the server saw.
    pub ip: String,
    /// Hardware id bound to the account, normalized to a stable string.
    pub hwid: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    pub last_login: String,
    /// The first (primary) subscription, if any.
    pub subscription: Option<Subscription>,
    /// All subscriptions, re-serialized as JSON for callers that want
    /// the full list.
    pub subscriptions_json: String,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            username: UNKNOWN_FIELD.to_string(),
            ip: UNKNOWN_FIELD.to_string(),
            hwid: "N/A".to_string(),
            created_at: UNKNOWN_FIELD.to_string(),
            last_login: UNKNOWN_FIELD.to_string(),
            subscription: None,
            subscriptions_json: "[]".to_string(),
        }
    }
}
