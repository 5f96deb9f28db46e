//! The URL-launch seam between the session core and the host platform.
//!
//! Outbound signals (the ready notification and the completion callback) are
//! fire-and-forget from the controller's point of view: a launch failure is
//! logged and never surfaced to the host as a structured error. Hosts inject
//! whatever implementation matches their platform; tests inject
//! [`RecordingLauncher`] to inspect exactly what would have been opened.

use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::error::Result;

/// Capability to open an outbound locator on the host platform.
pub trait LinkLauncher: Send + Sync {
    /// Attempts to open `url`. The controller ignores the result beyond a
    /// log line, but fakes and hosts may care.
    fn open(&self, url: &Url) -> Result<()>;
}

/// Launcher that drops every outbound link after logging it.
///
/// Useful for hosts that wire dispatch up elsewhere, and as a placeholder
/// during integration bring-up.
pub struct DiscardLauncher;

impl LinkLauncher for DiscardLauncher {
    fn open(&self, url: &Url) -> Result<()> {
        tracing::debug!(target: "taskgate.launch", %url, "discarding outbound link");
        Ok(())
    }
}

/// Launcher that records every opened URL for later inspection.
///
/// The unit-testing double for the launch seam; shipped in the library so
/// host applications can use it in their own integration tests.
#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<Url>>,
    fail: Mutex<bool>,
}

impl RecordingLauncher {
    /// Creates a launcher that accepts and records every open.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes subsequent opens fail while still recording them.
    pub fn fail_next_opens(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    /// Takes all recorded URLs, clearing the buffer.
    pub fn take_opened(&self) -> Vec<Url> {
        std::mem::take(&mut *self.opened.lock())
    }
}

impl LinkLauncher for RecordingLauncher {
    fn open(&self, url: &Url) -> Result<()> {
        self.opened.lock().push(url.clone());
        if *self.fail.lock() {
            Err(crate::Error::LaunchFailed(format!("refusing to open {url}")))
        } else {
            Ok(())
        }
    }
}
