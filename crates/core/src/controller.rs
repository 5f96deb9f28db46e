//! The session lifecycle controller.
//!
//! Owns the single active redirect session: parse buffers a pending task,
//! the readiness signal releases it exactly once to observers and notifies
//! the origin, and the completion report dispatches the callback and resets
//! every session field in one step.
//!
//! The controller is constructed by the host's composition root and handed
//! down to whichever layer drives the flow; there is no process-wide
//! singleton. All mutating operations serialize on an internal mutex, so a
//! host that shares the controller across threads still gets non-interleaved
//! parse/ready/report transitions.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::launcher::LinkLauncher;
use crate::observer::{ObserverRegistry, TaskObserver};
use crate::outcome::TaskOutcome;
use crate::request::{RequestRejection, TaskRequest};
use crate::signal;

/// Mutable session fields, guarded as one unit.
#[derive(Default)]
struct SessionState {
    provider_id: Option<String>,
    task_id: Option<String>,
    session_id: Option<String>,
    callback_url: Option<Url>,
    pending: Option<TaskRequest>,
}

impl SessionState {
    /// Clears every session field together; the provider id is
    /// configuration, not session state, and survives.
    fn clear_session(&mut self) {
        self.task_id = None;
        self.session_id = None;
        self.callback_url = None;
        self.pending = None;
    }
}

/// Controller for the focus-app redirect session lifecycle.
///
/// At most one session is active at a time; a new successful
/// [`parse_incoming`](Self::parse_incoming) silently replaces the previous
/// one, pending task included.
pub struct SessionController {
    launcher: Arc<dyn LinkLauncher>,
    state: Mutex<SessionState>,
    registry: Mutex<ObserverRegistry>,
}

impl SessionController {
    /// Creates a controller dispatching outbound signals through `launcher`.
    pub fn new(launcher: Arc<dyn LinkLauncher>) -> Self {
        Self {
            launcher,
            state: Mutex::new(SessionState::default()),
            registry: Mutex::new(ObserverRegistry::default()),
        }
    }

    /// Stores the integrator's provider identifier for inclusion in
    /// outbound signals. Touches no session state and never fails.
    pub fn configure(&self, provider_id: impl Into<String>) {
        let provider_id = provider_id.into();
        debug!(target: "taskgate.session", %provider_id, "provider configured");
        self.state.lock().provider_id = Some(provider_id);
    }

    /// Parses an inbound deep link, buffering its task for later release.
    ///
    /// Returns `false` without touching session state when the link is not a
    /// taskgate redirect, or looks like one but is malformed. On success the
    /// previous session, if any, is overwritten whole and `true` is
    /// returned; its undelivered pending task is discarded.
    pub fn parse_incoming(&self, url: &Url) -> bool {
        let request = match TaskRequest::from_url(url) {
            Ok(request) => request,
            Err(RequestRejection::NoMarker) => {
                debug!(target: "taskgate.session", %url, "inbound link is not a taskgate redirect");
                return false;
            }
            Err(rejection) => {
                warn!(target: "taskgate.session", %url, %rejection, "malformed taskgate link rejected");
                return false;
            }
        };

        debug!(
            target: "taskgate.session",
            task_id = %request.task_id,
            session_id = %request.session_id,
            "taskgate session started"
        );

        let mut state = self.state.lock();
        state.task_id = Some(request.task_id.clone());
        state.session_id = Some(request.session_id.clone());
        state.callback_url = Some(request.callback_url.clone());
        state.pending = Some(request);
        true
    }

    /// Releases the buffered task to observers and notifies the origin that
    /// the host UI is ready.
    ///
    /// Delivery is synchronous, in registration order (observer objects
    /// first, then the callback slot), and happens at most once per parsed
    /// request: a second call with no intervening parse delivers nothing.
    /// With no active session this is a logged no-op.
    pub fn signal_ready(&self) {
        let (pending, ready) = {
            let mut state = self.state.lock();
            let Some(session_id) = state.session_id.clone() else {
                warn!(target: "taskgate.session", "ready signalled with no active session");
                return;
            };
            let ready = signal::ready_url(&session_id, state.provider_id.as_deref());
            (state.pending.take(), ready)
        };

        if let Some(request) = pending {
            let (observers, callback) = self.registry.lock().delivery_snapshot();
            debug!(
                target: "taskgate.session",
                task_id = %request.task_id,
                observers = observers.len(),
                has_callback = callback.is_some(),
                "delivering pending task"
            );
            for observer in observers {
                observer.on_task_received(&request);
            }
            if let Some(callback) = callback {
                callback(&request);
            }
        }

        self.launch(&ready);
    }

    /// Reports the task outcome to the origin and resets the session.
    ///
    /// Appends `status`, `provider_id`, `session_id` and `task_id` to the
    /// stored callback target and hands the result to the launcher. The
    /// session is cleared whole, launch success or not; with no callback
    /// target this is a logged no-op that still leaves state reset.
    pub fn report_completion(&self, outcome: TaskOutcome) {
        let completion = {
            let mut state = self.state.lock();
            let callback_url = state.callback_url.take();
            let session_id = state.session_id.take();
            let task_id = state.task_id.take();
            state.clear_session();

            callback_url.map(|callback| {
                signal::completion_url(
                    &callback,
                    outcome,
                    state.provider_id.as_deref(),
                    session_id.as_deref(),
                    task_id.as_deref(),
                )
            })
        };

        match completion {
            Some(url) => {
                debug!(target: "taskgate.session", %outcome, "reporting task completion");
                self.launch(&url);
            }
            None => {
                warn!(target: "taskgate.session", %outcome, "completion reported with no callback target");
            }
        }
    }

    /// Alias for [`report_completion`](Self::report_completion) with
    /// [`TaskOutcome::Cancelled`].
    pub fn cancel_task(&self) {
        self.report_completion(TaskOutcome::Cancelled);
    }

    /// Registers an observer object; observers accumulate and are invoked in
    /// registration order.
    pub fn add_observer(&self, observer: Arc<dyn TaskObserver>) {
        self.registry.lock().add_observer(observer);
    }

    /// Sets the single-slot task callback, replacing any previous one. The
    /// callback is invoked after all observer objects on every delivery.
    pub fn set_task_callback(&self, callback: impl Fn(&TaskRequest) + Send + Sync + 'static) {
        self.registry.lock().set_callback(Arc::new(callback));
    }

    /// Whether a redirect session is currently active.
    pub fn has_active_session(&self) -> bool {
        self.state.lock().session_id.is_some()
    }

    /// Task id of the active session, if any.
    pub fn current_task_id(&self) -> Option<String> {
        self.state.lock().task_id.clone()
    }

    /// Session id of the active session, if any.
    pub fn current_session_id(&self) -> Option<String> {
        self.state.lock().session_id.clone()
    }

    /// Fire-and-forget dispatch through the injected launcher.
    fn launch(&self, url: &Url) {
        if let Err(err) = self.launcher.open(url) {
            warn!(target: "taskgate.launch", %url, error = %err, "outbound link dispatch failed");
        }
    }
}
