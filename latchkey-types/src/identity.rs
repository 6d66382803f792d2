//! Application identity supplied once at startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required length of an owner id.
pub const OWNER_ID_LEN: usize = 10;

/// Errors raised while validating an application identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A required identity field was empty.
    #[error("application identity field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// The owner id has the wrong length.
    #[error("owner id must be exactly {OWNER_ID_LEN} characters, got {0}")]
    BadOwnerIdLength(usize),
}

/// The identity of the application talking to the entitlement service.
///
/// Immutable for the process lifetime; every request carries these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    name: String,
    owner_id: String,
    version: String,
}

impl AppIdentity {
    /// Builds a validated identity.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is empty or the owner id is not
    /// exactly [`OWNER_ID_LEN`] characters.
    pub fn new(
        name: impl Into<String>,
        owner_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let name = name.into();
        let owner_id = owner_id.into();
        let version = version.into();

        if name.is_empty() {
            return Err(IdentityError::EmptyField("name"));
        }
        if owner_id.is_empty() {
            return Err(IdentityError::EmptyField("owner_id"));
        }
        if version.is_empty() {
            return Err(IdentityError::EmptyField("version"));
        }
        if owner_id.chars().count() != OWNER_ID_LEN {
            return Err(IdentityError::BadOwnerIdLength(owner_id.chars().count()));
        }

        Ok(Self {
            name,
            owner_id,
            version,
        })
    }

    /// The application name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 10-character owner id.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The application version string sent during the handshake.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}
