//! Event notification fan-out

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// Capability implemented by event sinks. Invoked synchronously for every
/// published event; implementations must not rely on delivery order.
pub trait LibraryObserver: Send + Sync {
    fn on_event(&self, message: &str);
}

/// Observer that forwards events to the structured log
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LibraryObserver for TracingObserver {
    fn on_event(&self, message: &str) {
        tracing::info!("library event: {}", message);
    }
}

/// Best-effort fan-out of textual event messages to registered observers.
/// Observers are deduplicated by identity; a failing observer never blocks
/// delivery to the others.
#[derive(Clone, Default)]
pub struct EventNotifier {
    observers: Arc<RwLock<Vec<Arc<dyn LibraryObserver>>>>,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Returns false when the same observer (by
    /// identity) is already subscribed.
    pub fn subscribe(&self, observer: Arc<dyn LibraryObserver>) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
        if observers.iter().any(|existing| same_observer(existing, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Remove an observer by identity. Returns false when it was not
    /// subscribed.
    pub fn unsubscribe(&self, observer: &Arc<dyn LibraryObserver>) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
        let before = observers.len();
        observers.retain(|existing| !same_observer(existing, observer));
        observers.len() < before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Deliver a message to every subscribed observer. A panicking observer
    /// is logged and skipped so the remaining observers still receive the
    /// message; nothing propagates to the caller.
    pub fn notify(&self, message: &str) {
        let observers: Vec<Arc<dyn LibraryObserver>> = self
            .observers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        for observer in observers {
            let delivery = catch_unwind(AssertUnwindSafe(|| observer.on_event(message)));
            if delivery.is_err() {
                tracing::warn!("observer failed while handling event: {}", message);
            }
        }
    }
}

fn same_observer(a: &Arc<dyn LibraryObserver>, b: &Arc<dyn LibraryObserver>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const u8,
        Arc::as_ptr(b) as *const u8,
    )
}
