//! Core type definitions for the LatchKey client.
//!
//! This crate defines the plain data types shared by the protocol and
//! client layers:
//! - Application identity (name, owner id, version)
//! - Session lifecycle state
//! - Decoded server records (app info, user info)
//!
//! Nothing here performs I/O or cryptography; those belong to
//! `latchkey-protocol` and `latchkey-client`.

mod identity;
mod records;
mod session;

pub use identity::{AppIdentity, IdentityError, OWNER_ID_LEN};
pub use records::{AppInfo, Subscription, UserInfo, UNKNOWN_FIELD};
pub use session::{Session, SessionState};
