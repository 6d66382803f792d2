//! Opening URLs with the host system's default handler.
//!
//! Used by callers when a version-mismatch reply carries a download
//! target; the core only surfaces the URL and never opens it itself.

use crate::error::{ClientError, ClientResult};
use std::process::Command;

/// Capability interface for handing a URL to the host.
pub trait LinkOpener: Send + Sync {
    /// Opens `url` with the platform's default handler.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Link`] when the handler cannot be spawned.
    fn open(&self, url: &str) -> ClientResult<()>;
}

/// Default opener using the platform launcher command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> ClientResult<()> {
        let mut command = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/c", "start", url]);
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };

        command
            .spawn()
            .map(|_| ())
            .map_err(|e| ClientError::Link(format!("{url}: {e}")))
    }
}
