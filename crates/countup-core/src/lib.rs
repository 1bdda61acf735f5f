//! # countup-core
//!
//! Core library for countup: counters that animate a displayed number from a
//! start value to an end value with linear interpolation, one sample per
//! display refresh, driven by an injectable tick scheduler.

pub mod animator;
pub mod clock;
pub mod constants;
pub mod error;
pub mod format;
pub mod observer;
pub mod observers;
pub mod options;
pub mod run;
pub mod scheduler;
pub mod strip;
pub mod token;
pub mod update;

// Re-exports
pub use animator::{AnimationHandle, CounterAnimator};
pub use clock::{FrameLoop, SimulatedClock};
pub use constants::{exit_codes, DEFAULT_DURATION_MS, DEFAULT_FPS, SIMULATED_STEP_MS};
pub use error::CounterError;
pub use observer::{CounterObserver, ObserverSubject};
pub use options::{AnimatorOptions, Rounding};
pub use run::{AnimationRun, RunState, Sample};
pub use scheduler::{TickCallback, TickScheduler, TickToken};
pub use strip::{CounterStrip, StatEntry, StripHandle};
pub use token::CancellationToken;
pub use update::{CounterUpdate, RunEvent};

/// Sample a whole run on a fixed-step simulated clock and return every
/// delivered value.
///
/// This is a convenience for replaying a run without a real frame source.
///
/// # Example
/// ```
/// let values = countup_core::replay(0.0, 150.0, 2000.0, 100.0).unwrap();
/// assert_eq!(values.first(), Some(&0.0));
/// assert_eq!(values[10], 75.0);
/// assert_eq!(values.last(), Some(&150.0));
/// ```
pub fn replay(start: f64, end: f64, duration_ms: f64, step_ms: f64) -> Result<Vec<f64>, CounterError> {
    if !step_ms.is_finite() || step_ms <= 0.0 {
        return Err(CounterError::InvalidConfiguration(format!(
            "step must be a positive number of milliseconds, got {step_ms}"
        )));
    }
    let clock = std::sync::Arc::new(SimulatedClock::new());
    let animator = CounterAnimator::new(clock.clone());
    let values = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = values.clone();
    animator.start(start, end, duration_ms, move |v| sink.lock().push(v))?;
    clock.run_until_idle(step_ms, constants::MAX_SIMULATED_FRAMES);
    let collected = std::mem::take(&mut *values.lock());
    Ok(collected)
}
