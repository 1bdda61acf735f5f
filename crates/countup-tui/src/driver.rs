//! Starts, stops and restarts the strip on behalf of the dashboard.

use std::sync::Arc;

use tracing::debug;

use countup_core::{CounterAnimator, CounterError, CounterObserver, CounterStrip, StripHandle};

/// Owns the strip and the handle of its current run.
pub struct StripDriver {
    animator: CounterAnimator,
    strip: CounterStrip,
    observer: Arc<dyn CounterObserver>,
    handle: Option<StripHandle>,
    generation: u64,
}

impl StripDriver {
    #[must_use]
    pub fn new(animator: CounterAnimator, strip: CounterStrip, observer: Arc<dyn CounterObserver>) -> Self {
        Self {
            animator,
            strip,
            observer,
            handle: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn strip(&self) -> &CounterStrip {
        &self.strip
    }

    /// Number of times the strip was started.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start the strip, stopping any previous run first.
    pub fn start(&mut self) -> Result<(), CounterError> {
        self.stop();
        let handle = self.strip.start(&self.animator, &self.observer)?;
        self.generation += 1;
        debug!(generation = self.generation, "strip started from dashboard");
        self.handle = Some(handle);
        Ok(())
    }

    /// Stop every running counter. No-op if nothing runs.
    pub fn stop(&self) {
        if let Some(handle) = &self.handle {
            handle.stop_all();
        }
    }

    /// Whether the current run (if any) has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, StripHandle::all_finished)
    }

    /// Last values of the current run.
    #[must_use]
    pub fn values(&self) -> Option<Vec<f64>> {
        self.handle.as_ref().map(StripHandle::values)
    }
}
