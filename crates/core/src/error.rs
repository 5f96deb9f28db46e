//! Error types for the taskgate session core.
//!
//! The controller itself never raises these across its public mutating
//! operations: unrecognized or malformed inbound links are a `false` return,
//! and a failed outbound launch is logged and dropped. The enum exists for
//! the [`LinkLauncher`](crate::LinkLauncher) seam and URL handling, so fakes
//! and host launchers have a structured failure to report.

use thiserror::Error;

/// Errors surfaced at the collaborator seams of the session core.
#[derive(Debug, Error)]
pub enum Error {
    /// The platform launcher could not open the outbound locator.
    #[error("failed to open outbound link: {0}")]
    LaunchFailed(String),

    /// A callback target did not parse as a URL.
    #[error("invalid callback url: {0}")]
    InvalidCallback(#[from] url::ParseError),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
