//! Observer registration and ordered task delivery.
//!
//! Two registration forms exist for host convenience: any number of
//! [`TaskObserver`] objects, and one replaceable callback slot. On delivery,
//! observer objects are invoked in registration order, then the callback.
//! Registering a new callback replaces the previous one; it never appends.

use std::sync::Arc;

use crate::request::TaskRequest;

/// A registered recipient of released task requests.
pub trait TaskObserver: Send + Sync {
    /// Called synchronously, at most once per parsed request, when the host
    /// signals readiness.
    fn on_task_received(&self, request: &TaskRequest);
}

/// The replaceable single-slot callback form of an observer.
pub(crate) type TaskCallback = Arc<dyn Fn(&TaskRequest) + Send + Sync>;

/// Ordered registry of observers plus the callback slot.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<Arc<dyn TaskObserver>>,
    callback: Option<TaskCallback>,
}

impl ObserverRegistry {
    pub(crate) fn add_observer(&mut self, observer: Arc<dyn TaskObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn set_callback(&mut self, callback: TaskCallback) {
        self.callback = Some(callback);
    }

    /// Snapshot of the delivery order: observers first, callback last.
    ///
    /// Cloned out so delivery happens without holding the registry lock,
    /// letting an observer re-register from inside its own notification.
    pub(crate) fn delivery_snapshot(&self) -> (Vec<Arc<dyn TaskObserver>>, Option<TaskCallback>) {
        (self.observers.clone(), self.callback.clone())
    }
}
