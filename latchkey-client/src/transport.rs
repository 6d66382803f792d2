//! The signed HTTP transport.
//!
//! Encodes an operation as a form-urlencoded POST, reads the body and the
//! two signature headers, verifies the envelope, appends the audit entry,
//! and hands back the verified raw payload. Individual exchanges are
//! stateless beyond the shared identity and may run concurrently.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use latchkey_protocol::{verify_envelope, AuditLog, SignedEnvelope};
use latchkey_types::AppIdentity;
use std::time::Duration;
use tracing::{debug, warn};

/// Response header carrying the hex-encoded detached signature.
const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Response header carrying the decimal Unix-seconds timestamp.
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// A transport that signs nothing but verifies everything it receives.
pub struct SignedTransport {
    identity: AppIdentity,
    config: ClientConfig,
    http: reqwest::Client,
    audit: Option<AuditLog>,
}

impl SignedTransport {
    /// Creates a transport for the given identity and configuration.
    #[must_use]
    pub fn new(identity: AppIdentity, config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        let audit = config.audit_log_path.clone().map(AuditLog::new);

        Self {
            identity,
            config,
            http,
            audit,
        }
    }

    /// The identity injected into every request.
    #[must_use]
    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    /// Sends one operation and returns the verified response body.
    ///
    /// The operation discriminator, application name, and owner id are
    /// always injected; the session id is injected for every operation
    /// except the initial handshake.
    ///
    /// # Errors
    ///
    /// [`ClientError::Network`] for connect/timeout/body-read failures,
    /// and the protocol errors for missing headers, stale timestamps, or
    /// signature mismatches. The audit append is best-effort and never
    /// fails the operation.
    pub async fn send(
        &self,
        operation: &str,
        session_id: Option<&str>,
        fields: &[(&str, &str)],
    ) -> ClientResult<Vec<u8>> {
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(fields.len() + 4);
        form.push(("type", operation));
        form.push(("name", self.identity.name()));
        form.push(("ownerid", self.identity.owner_id()));
        if let Some(session_id) = session_id {
            form.push(("sessionid", session_id));
        }
        form.extend_from_slice(fields);

        debug!(operation, "dispatching signed request");

        let response = self
            .http
            .post(&self.config.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("request failed: {e}")))?;

        let signature = header_value(&response, SIGNATURE_HEADER);
        let timestamp = header_value(&response, TIMESTAMP_HEADER);

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response body: {e}")))?
            .to_vec();

        let envelope =
            SignedEnvelope::from_parts(body, signature.as_deref(), timestamp.as_deref())?;
        verify_envelope(&envelope, &self.config.verifying_key_hex)?;

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.append(operation, envelope.body(), false) {
                warn!(operation, error = %e, "audit append failed");
            }
        }

        Ok(envelope.into_body())
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
