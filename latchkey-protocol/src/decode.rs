//! Defensive decoding of server payloads.
//!
//! The server's JSON is loosely typed: fields may be absent, mistyped,
//! or whole sub-objects missing. Nothing here trusts the shape of the
//! input. Cosmetic fields degrade to a sentinel; fields the caller's
//! correctness depends on (the hardware id) are normalized to one stable
//! representation.

use crate::error::{ProtocolError, ProtocolResult};
use latchkey_types::{AppInfo, Subscription, UserInfo};
use serde_json::{Map, Value};

/// Exact body the server sends when the application does not exist.
pub const APP_NOT_FOUND_SENTINEL: &[u8] = b"LatchKey_Invalid";

/// The `message` value the server uses to signal a version mismatch.
pub const VERSION_MISMATCH_MESSAGE: &str = "invalidver";

/// A decoded server reply.
///
/// Directives are recognized before the generic success/failure shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerReply {
    /// The application is unknown to the server. Fatal for the handshake.
    AppNotFound,
    /// The client version is no longer accepted; `download` optionally
    /// points at the replacement build.
    VersionMismatch {
        /// Redirect target for the current build, when the owner set one.
        download: Option<String>,
    },
    /// The operation succeeded.
    Success {
        /// Human-readable server message.
        message: String,
        /// Set on handshake replies for a freshly minted session; the
        /// caller should pause briefly before issuing further requests.
        new_session: bool,
        /// The full top-level response object for payload extraction.
        fields: Map<String, Value>,
    },
    /// The operation was rejected by the server (semantic failure).
    Failure {
        /// Human-readable server message.
        message: String,
    },
}

impl ServerReply {
    /// The server-issued session id, when present on a success reply.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Success { fields, .. } => fields.get("sessionid").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Decodes a verified response body into a [`ServerReply`].
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] when the body is not a
/// JSON object with a boolean `success` and string `message`.
pub fn decode_reply(body: &[u8]) -> ProtocolResult<ServerReply> {
    if body == APP_NOT_FOUND_SENTINEL {
        return Ok(ServerReply::AppNotFound);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ProtocolError::MalformedEnvelope(format!("body is not JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(ProtocolError::MalformedEnvelope(
            "body is not a JSON object".to_string(),
        ));
    };

    // Version mismatch is recognized regardless of the success flag.
    if fields.get("message").and_then(Value::as_str) == Some(VERSION_MISMATCH_MESSAGE) {
        let download = fields
            .get("download")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from);
        return Ok(ServerReply::VersionMismatch { download });
    }

    let Some(success) = fields.get("success").and_then(Value::as_bool) else {
        return Err(ProtocolError::MalformedEnvelope(
            "missing or non-boolean `success` field".to_string(),
        ));
    };
    let Some(message) = fields.get("message").and_then(Value::as_str) else {
        return Err(ProtocolError::MalformedEnvelope(
            "missing or non-string `message` field".to_string(),
        ));
    };
    let message = message.to_string();

    if success {
        let new_session = fields
            .get("newSession")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(ServerReply::Success {
            message,
            new_session,
            fields,
        })
    } else {
        Ok(ServerReply::Failure { message })
    }
}

/// Reads a string field, tolerating absence and mistyping.
fn string_or(obj: &Map<String, Value>, key: &str, fallback: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Extracts the `appinfo` record from a success reply's fields.
///
/// Every field is cosmetic; absent or mistyped values become the
/// defined-empty sentinel rather than aborting the record.
#[must_use]
pub fn decode_app_info(fields: &Map<String, Value>) -> AppInfo {
    let defaults = AppInfo::default();
    let Some(Value::Object(info)) = fields.get("appinfo") else {
        return defaults;
    };

    AppInfo {
        num_users: string_or(info, "numUsers", &defaults.num_users),
        num_online_users: string_or(info, "numOnlineUsers", &defaults.num_online_users),
        num_keys: string_or(info, "numKeys", &defaults.num_keys),
        customer_panel_url: string_or(info, "customerPanelLink", &defaults.customer_panel_url),
    }
}

/// Extracts the `info` user record from a success reply's fields.
///
/// The hardware id may arrive as either a JSON string or a number; both
/// are normalized to one stable text form (numbers render with six
/// decimal places, matching what the server's other clients expect).
/// An absent or empty hardware id becomes `"N/A"`.
#[must_use]
pub fn decode_user_info(fields: &Map<String, Value>) -> UserInfo {
    let defaults = UserInfo::default();
    let Some(Value::Object(info)) = fields.get("info") else {
        return defaults;
    };

    let hwid = match info.get("hwid") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n
            .as_f64()
            .map_or_else(|| defaults.hwid.clone(), |f| format!("{f:.6}")),
        _ => defaults.hwid.clone(),
    };

    let subscriptions = info.get("subscriptions").and_then(Value::as_array);
    let subscription = subscriptions
        .and_then(|subs| subs.first())
        .and_then(Value::as_object)
        .map(|sub| Subscription {
            name: string_or(sub, "subscription", latchkey_types::UNKNOWN_FIELD),
            expiry: string_or(sub, "expiry", latchkey_types::UNKNOWN_FIELD),
        });
    let subscriptions_json = subscriptions
        .map(|subs| Value::Array(subs.clone()).to_string())
        .unwrap_or_else(|| defaults.subscriptions_json.clone());

    UserInfo {
        username: string_or(info, "username", &defaults.username),
        ip: string_or(info, "ip", &defaults.ip),
        hwid,
        created_at: string_or(info, "createdate", &defaults.created_at),
        last_login: string_or(info, "lastlogin", &defaults.last_login),
        subscription,
        subscriptions_json,
    }
}

/// Decodes a list-shaped payload (online users, chat messages) into an
/// ordered sequence of strings.
///
/// An absent, empty, or mistyped list decodes to an empty vec, never an
/// error; non-string elements are skipped.
#[must_use]
pub fn decode_string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Decodes the hex-encoded `contents` field of a file download reply.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] when the field is absent
/// or not a string, and [`ProtocolError::InvalidEncoding`] when the hex
/// string does not decode.
pub fn decode_file_contents(fields: &Map<String, Value>) -> ProtocolResult<Vec<u8>> {
    let contents = fields
        .get("contents")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProtocolError::MalformedEnvelope("missing or non-string `contents` field".to_string())
        })?;

    Ok(hex::decode(contents)?)
}
