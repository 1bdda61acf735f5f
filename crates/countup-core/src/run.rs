//! A single counter run and its sampling rule.
//!
//! `AnimationRun` is pure state: it knows nothing about scheduling. Each call
//! to [`AnimationRun::sample`] takes a frame timestamp and returns the value
//! to display, moving the run from `Running` to `Completed` once the full
//! duration has elapsed.

use serde::Serialize;

use crate::error::{validate_run, CounterError};
use crate::options::Rounding;

/// Lifecycle state of a run. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Still producing samples.
    Running,
    /// Reached `end` after the full duration.
    Completed,
    /// Stopped by the caller before completion.
    Cancelled,
}

impl RunState {
    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Result of sampling a run at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Displayed value after rounding and clamping.
    pub value: f64,
    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fraction: f64,
    /// Milliseconds since the first sample.
    pub elapsed_ms: f64,
    /// Whether this is the final sample of a naturally completed run.
    pub done: bool,
}

/// One counter animating from a fixed start to a fixed end over a fixed
/// duration.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    start: f64,
    end: f64,
    duration_ms: f64,
    rounding: Rounding,
    start_timestamp: Option<f64>,
    last_elapsed_ms: f64,
    current_value: f64,
    state: RunState,
}

impl AnimationRun {
    /// Create a run, rejecting non-finite bounds and non-positive durations.
    pub fn new(
        start: f64,
        end: f64,
        duration_ms: f64,
        rounding: Rounding,
    ) -> Result<Self, CounterError> {
        validate_run(start, end, duration_ms)?;
        Ok(Self {
            start,
            end,
            duration_ms,
            rounding,
            start_timestamp: None,
            last_elapsed_ms: 0.0,
            current_value: start,
            state: RunState::Running,
        })
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Timestamp of the first sample, once one has been taken.
    #[must_use]
    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    /// Value delivered by the most recent sample (`start` before any).
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    fn ascending(&self) -> bool {
        self.end >= self.start
    }

    fn bounds(&self) -> (f64, f64) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Compute the sample for a frame at `now` (milliseconds).
    ///
    /// The first call pins the start timestamp. Returns `None` once the run
    /// is in a terminal state. A timestamp earlier than a previous one is
    /// treated as no elapsed progress.
    pub fn sample(&mut self, now: f64) -> Option<Sample> {
        if self.state.is_terminal() {
            return None;
        }

        let origin = *self.start_timestamp.get_or_insert(now);
        let elapsed_ms = (now - origin).max(self.last_elapsed_ms);
        self.last_elapsed_ms = elapsed_ms;

        let fraction = (elapsed_ms / self.duration_ms).min(1.0);
        let done = fraction >= 1.0;

        let value = if done {
            self.state = RunState::Completed;
            self.end
        } else {
            let span = self.end - self.start;
            // span overflows for bounds near f64::MAX of opposite signs
            let raw = if span.is_finite() {
                self.start + span * fraction
            } else {
                self.start * (1.0 - fraction) + self.end * fraction
            };
            let (lo, hi) = self.bounds();
            self.rounding.apply(raw, self.ascending()).clamp(lo, hi)
        };
        self.current_value = value;

        Some(Sample {
            value,
            fraction,
            elapsed_ms,
            done,
        })
    }

    /// Move a running run to `Cancelled`.
    ///
    /// Returns `false` if the run had already reached a terminal state.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = RunState::Cancelled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: f64, end: f64, duration: f64) -> AnimationRun {
        AnimationRun::new(start, end, duration, Rounding::Floor).unwrap()
    }

    #[test]
    fn first_sample_is_start() {
        let mut r = run(0.0, 150.0, 2000.0);
        let s = r.sample(500.0).unwrap();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.fraction, 0.0);
        assert_eq!(r.start_timestamp(), Some(500.0));
    }

    #[test]
    fn midpoint_is_half() {
        let mut r = run(0.0, 150.0, 2000.0);
        r.sample(0.0);
        let s = r.sample(1000.0).unwrap();
        assert_eq!(s.value, 75.0);
        assert!(!s.done);
    }

    #[test]
    fn completes_at_exact_end() {
        let mut r = run(0.0, 150.0, 2000.0);
        r.sample(0.0);
        let s = r.sample(2500.0).unwrap();
        assert!(s.done);
        assert_eq!(s.value, 150.0);
        assert_eq!(s.fraction, 1.0);
        assert_eq!(r.state(), RunState::Completed);
        assert!(r.sample(3000.0).is_none());
    }

    #[test]
    fn descending_uses_floor() {
        let mut r = run(5000.0, 0.0, 2000.0);
        r.sample(0.0);
        // 5000 - 5000 * (1/3) = 3333.33.. -> 3333
        let s = r.sample(2000.0 / 3.0).unwrap();
        assert_eq!(s.value, 3333.0);
    }

    #[test]
    fn clamps_into_interval() {
        let mut r = AnimationRun::new(0.5, 10.0, 100.0, Rounding::Floor).unwrap();
        let s = r.sample(0.0).unwrap();
        assert_eq!(s.value, 0.5);
    }

    #[test]
    fn backwards_clock_does_not_regress() {
        let mut r = run(0.0, 100.0, 1000.0);
        r.sample(100.0);
        let a = r.sample(600.0).unwrap();
        let b = r.sample(300.0).unwrap();
        assert_eq!(a.value, b.value);
        assert_eq!(b.elapsed_ms, 500.0);
    }

    #[test]
    fn equal_bounds_complete_after_duration() {
        let mut r = run(42.0, 42.0, 10.0);
        let first = r.sample(0.0).unwrap();
        assert_eq!(first.value, 42.0);
        assert!(!first.done);
        assert_eq!(r.state(), RunState::Running);
        let last = r.sample(10.0).unwrap();
        assert!(last.done);
        assert_eq!(last.value, 42.0);
    }

    #[test]
    fn cancel_is_terminal() {
        let mut r = run(0.0, 12000.0, 2000.0);
        r.sample(0.0);
        assert!(r.cancel());
        assert!(!r.cancel());
        assert_eq!(r.state(), RunState::Cancelled);
        assert!(r.sample(100.0).is_none());
    }

    #[test]
    fn cancel_after_completion_is_noop() {
        let mut r = run(0.0, 1.0, 1.0);
        r.sample(0.0);
        r.sample(1.0);
        assert!(!r.cancel());
        assert_eq!(r.state(), RunState::Completed);
    }

    #[test]
    fn rejects_invalid() {
        assert!(AnimationRun::new(0.0, 1.0, 0.0, Rounding::Floor).is_err());
        assert!(AnimationRun::new(f64::NAN, 1.0, 1.0, Rounding::Floor).is_err());
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let mut r = run(-f64::MAX, f64::MAX, 100.0);
        let first = r.sample(0.0).unwrap();
        assert_eq!(first.value, -f64::MAX);
        let mid = r.sample(50.0).unwrap();
        assert!(mid.value.is_finite());
        assert_eq!(r.sample(100.0).unwrap().value, f64::MAX);
    }
}
