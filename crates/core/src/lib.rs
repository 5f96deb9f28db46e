//! taskgate-core: session lifecycle controller for the focus-app redirect flow.
//!
//! A host application that blocks distracting apps can redirect the user to a
//! partner "focus app" via a deep link. This crate owns the one stateful piece
//! of that integration: it parses the inbound deep link into a task request,
//! holds it pending until the host signals that its UI is ready, delivers it
//! exactly once to registered observers, and later reports the task outcome
//! back to the origin through a second deep link, clearing session state
//! atomically.
//!
//! # Control flow
//!
//! 1. The platform hands the host an inbound URL; the host forwards it to
//!    [`SessionController::parse_incoming`].
//! 2. Once the host UI is loaded it calls [`SessionController::signal_ready`],
//!    which releases the buffered task to observers and notifies the origin.
//! 3. The host reports the user's decision via
//!    [`SessionController::report_completion`], which dispatches the callback
//!    URL and resets the session.
//!
//! Everything else (task UI, URL-scheme registration, the actual URL launch)
//! is host-application concern, reached through the [`LinkLauncher`] seam.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskgate::{DiscardLauncher, SessionController, TaskOutcome};
//! use url::Url;
//!
//! let controller = SessionController::new(Arc::new(DiscardLauncher));
//! controller.configure("partner-123");
//!
//! let link = Url::parse(
//!     "focusapp://host/taskgate?task_id=breathing&callback_url=blocker%3A%2F%2Fdone",
//! )?;
//! if controller.parse_incoming(&link) {
//!     controller.set_task_callback(|task| println!("show task {}", task.task_id));
//!     controller.signal_ready();
//!     controller.report_completion(TaskOutcome::StayedFocused);
//! }
//! # Ok::<(), url::ParseError>(())
//! ```

pub mod controller;
pub mod error;
pub mod launcher;
pub mod observer;
pub mod outcome;
pub mod request;
pub mod signal;

pub use controller::SessionController;
pub use error::{Error, Result};
pub use launcher::{DiscardLauncher, LinkLauncher, RecordingLauncher};
pub use observer::TaskObserver;
pub use outcome::TaskOutcome;
pub use request::{RequestRejection, TaskRequest, MARKER};
