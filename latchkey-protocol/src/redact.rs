//! Redaction of sensitive response fields before they reach the audit
//! trail.

use serde_json::Value;

/// Marker written in place of a sensitive field's value.
pub const REDACTED: &str = "REDACTED";

/// Field names whose values are always masked.
const SENSITIVE_KEYS: &[&str] = &[
    "sessionid",
    "ownerid",
    "app",
    "secret",
    "version",
    "fileid",
    "webhooks",
];

/// Masks the sensitive keys of a decoded record, leaving every other key
/// and the overall shape untouched.
///
/// Idempotent: redacting an already-redacted record is a no-op.
/// Non-object values are returned unchanged.
#[must_use]
pub fn redact(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for key in SENSITIVE_KEYS {
            if let Some(entry) = map.get_mut(*key) {
                *entry = Value::String(REDACTED.to_string());
            }
        }
    }
    value
}

/// Parses a response body and renders its redacted form.
///
/// A body that is not valid JSON is returned as-is (lossily decoded);
/// there is nothing sensitive to mask in a shape we cannot parse.
#[must_use]
pub fn redact_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => redact(value).to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
