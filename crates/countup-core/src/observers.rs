//! Concrete observer implementations.

use std::collections::HashMap;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::constants::LOG_VALUE_THRESHOLD;
use crate::observer::CounterObserver;
use crate::update::{CounterUpdate, RunEvent};

/// Message carried by a [`ChannelObserver`].
#[derive(Debug, Clone)]
pub enum CounterMessage {
    Update(CounterUpdate),
    Event(RunEvent),
}

/// Observer that sends updates through a channel (non-blocking).
///
/// A full or disconnected channel drops the message; the animation itself
/// never waits on a consumer.
pub struct ChannelObserver {
    sender: Sender<CounterMessage>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<CounterMessage>) -> Self {
        Self { sender }
    }
}

impl CounterObserver for ChannelObserver {
    fn on_update(&self, update: &CounterUpdate) {
        let _ = self.sender.try_send(CounterMessage::Update(update.clone()));
    }

    fn on_event(&self, event: &RunEvent) {
        let _ = self.sender.try_send(CounterMessage::Event(event.clone()));
    }
}

/// Observer that logs values through `tracing`, skipping updates that moved
/// less than `min_delta` since the last logged one of the same run.
pub struct LoggingObserver {
    last_logged: Mutex<HashMap<usize, f64>>,
    min_delta: f64,
}

impl LoggingObserver {
    /// Create a logging observer with the given minimum value change.
    #[must_use]
    pub fn new(min_delta: f64) -> Self {
        Self {
            last_logged: Mutex::new(HashMap::new()),
            min_delta,
        }
    }

    /// Last value logged for `run_index`, if any.
    #[must_use]
    pub fn last_logged(&self, run_index: usize) -> Option<f64> {
        self.last_logged.lock().get(&run_index).copied()
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(LOG_VALUE_THRESHOLD)
    }
}

impl CounterObserver for LoggingObserver {
    fn on_update(&self, update: &CounterUpdate) {
        {
            let mut last_logged = self.last_logged.lock();
            if let Some(last) = last_logged.get(&update.run_index) {
                if !update.done && (update.value - last).abs() < self.min_delta {
                    return;
                }
            }
            last_logged.insert(update.run_index, update.value);
        }
        debug!(
            run = update.run_index,
            label = %update.label,
            value = update.value,
            progress = format!("{:.1}%", update.fraction * 100.0),
            "Counter update"
        );
    }

    fn on_event(&self, event: &RunEvent) {
        match event {
            RunEvent::Started {
                run_index,
                label,
                start,
                end,
            } => debug!(run = run_index, label = %label, start, end, "Counter started"),
            RunEvent::Completed { run_index, label } => {
                info!(run = run_index, label = %label, "Counter complete");
            }
            RunEvent::Cancelled {
                run_index,
                label,
                last_value,
            } => info!(run = run_index, label = %label, last_value, "Counter cancelled"),
        }
    }
}

/// Null object pattern: discards every update.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterObserver for NoOpObserver {
    fn on_update(&self, _update: &CounterUpdate) {}
}
