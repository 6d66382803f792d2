//! Authenticated client for the LatchKey entitlement service.
//!
//! Turns logical operations ("log in", "read a variable", "fetch a
//! signed file") into signed HTTP exchanges, verifies every reply
//! against the embedded Ed25519 key with a freshness window, and
//! surfaces typed results or classified failures.
//!
//! # Components
//!
//! - **Transport**: form-urlencoded POSTs, mandatory signature headers,
//!   bounded timeout, redacted audit trail
//! - **Session**: the `Uninitialized → Active → Terminated` lifecycle;
//!   every operation is guarded by it
//! - **Operations**: thin callers over the transport (login, variables,
//!   files, chat, ...)
//! - **Host capabilities**: fingerprint provider, credential token
//!   store, link opener
//!
//! # Example
//!
//! ```no_run
//! use latchkey_client::{ClientConfig, EntitlementClient};
//! use latchkey_types::AppIdentity;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = AppIdentity::new("MyApp", "0123456789", "1.0")?;
//! let client = EntitlementClient::new(identity, ClientConfig::default());
//!
//! client.handshake().await?;
//! let user = client.login("alice", "hunter2").await?;
//! println!("welcome back, {}", user.username);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod device;
mod error;
mod link;
mod ops;
mod token;
mod transport;

pub use client::EntitlementClient;
pub use config::ClientConfig;
pub use device::{executable_checksum, HostFingerprint, SystemFingerprint};
pub use error::{ClientError, ClientResult};
pub use link::{LinkOpener, SystemLinkOpener};
pub use token::CredentialToken;
pub use transport::SignedTransport;
