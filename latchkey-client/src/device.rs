//! Host fingerprinting and executable integrity.
//!
//! The fingerprint identifies this machine to the entitlement service;
//! the core treats it as an opaque credential component. The default
//! implementation combines stable platform identifiers and hashes them,
//! so the value survives reboots but changes when the hardware does.

use crate::error::{ClientError, ClientResult};
use sha2::{Digest, Sha256};
use std::env;

/// Capability interface for deriving a stable hardware identifier.
///
/// Implement this to substitute a custom fingerprint source (tests use a
/// fixed string).
pub trait HostFingerprint: Send + Sync {
    /// Derives the fingerprint for the current host.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fingerprint`] when no stable identifier
    /// can be read on this platform.
    fn fingerprint(&self) -> ClientResult<String>;
}

/// Default fingerprint built from platform identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFingerprint;

impl HostFingerprint for SystemFingerprint {
    fn fingerprint(&self) -> ClientResult<String> {
        let machine_id = get_machine_id()
            .ok_or_else(|| ClientError::Fingerprint("no machine id on this platform".into()))?;

        let components = [
            env::consts::OS.to_string(),
            env::consts::ARCH.to_string(),
            machine_id,
            get_hostname(),
        ];

        let mut hasher = Sha256::new();
        hasher.update(components.join("|").as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Gets the machine ID (platform-specific unique identifier).
fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd.exe")
            .args(["/c", "wmic useraccount where name='%username%' get sid"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|out| out.trim_start_matches("SID").trim().to_string())
            .filter(|sid| !sid.is_empty())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        None
    }
}

/// Computes the hex SHA-256 of the running executable's bytes, sent as
/// the content fingerprint during the handshake.
///
/// An unreadable executable degrades to an empty string; the server
/// treats an empty hash as "no integrity claim" rather than a failure.
#[must_use]
pub fn executable_checksum() -> String {
    let Ok(path) = env::current_exe() else {
        return String::new();
    };
    let Ok(bytes) = std::fs::read(&path) else {
        return String::new();
    };

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}
