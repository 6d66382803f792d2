//! Append-only audit trail of signed exchanges.
//!
//! Every verified exchange may be recorded locally: timestamp, operation
//! discriminator, redacted body, tamper flag. The append is best-effort;
//! a failed write is the caller's to report, never a reason to fail the
//! operation that produced it. Only bodies at or below
//! [`MAX_AUDITED_BODY_BYTES`] are logged; oversized bodies are skipped
//! rather than truncated.

use crate::redact::redact_body;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bodies larger than this are not written to the audit trail.
pub const MAX_AUDITED_BODY_BYTES: usize = 200;

/// One recorded exchange.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// When the exchange completed, local time.
    pub timestamp: DateTime<Local>,
    /// The operation discriminator (`login`, `var`, ...).
    pub operation: String,
    /// The redacted response body.
    pub redacted_body: String,
    /// Whether verification flagged the response as tampered.
    pub tampered: bool,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "{} | {}",
            self.timestamp.format("%I:%M:%S %p | %m/%d/%Y"),
            self.operation
        )?;
        writeln!(f, "Response: {}", self.redacted_body)?;
        writeln!(f, "Was response tampered with? {}", self.tampered)
    }
}

/// Append-only audit log backed by a local text file.
///
/// Write-only: the client never reads entries back.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Creates an audit log that appends to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this log appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records one exchange, redacting the body first.
    ///
    /// Bodies over [`MAX_AUDITED_BODY_BYTES`] are skipped entirely;
    /// `Ok(false)` reports the skip.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the append fails. Callers
    /// treat this as best-effort and report rather than propagate.
    pub fn append(&self, operation: &str, body: &[u8], tampered: bool) -> io::Result<bool> {
        if body.len() > MAX_AUDITED_BODY_BYTES {
            debug!(operation, body_len = body.len(), "body exceeds audit cap, skipping");
            return Ok(false);
        }

        let entry = AuditEntry {
            timestamp: Local::now(),
            operation: operation.to_string(),
            redacted_body: redact_body(body),
            tampered,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.to_string().as_bytes())?;

        Ok(true)
    }
}
