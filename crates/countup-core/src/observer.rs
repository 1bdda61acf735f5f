//! Observer pattern for counter updates.
//!
//! Presentation layers receive samples through [`CounterObserver`] instead of
//! raw closures when they need labels, run indices or lifecycle events.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::update::{CounterUpdate, RunEvent};

/// Observer trait for receiving counter updates.
pub trait CounterObserver: Send + Sync {
    /// Receive a displayed value.
    fn on_update(&self, update: &CounterUpdate);

    /// Receive a lifecycle event. Ignored by default.
    fn on_event(&self, _event: &RunEvent) {}
}

/// Subject that fans updates out to a collection of observers.
pub struct ObserverSubject {
    observers: RwLock<Vec<Arc<dyn CounterObserver>>>,
}

impl ObserverSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn CounterObserver>) {
        self.observers.write().push(observer);
    }

    /// Unregister all observers.
    pub fn clear(&self) {
        self.observers.write().clear();
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ObserverSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterObserver for ObserverSubject {
    fn on_update(&self, update: &CounterUpdate) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_update(update);
        }
    }

    fn on_event(&self, event: &RunEvent) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_event(event);
        }
    }
}
