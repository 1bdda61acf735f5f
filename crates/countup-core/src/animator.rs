//! `CounterAnimator`: drives runs from a tick scheduler.
//!
//! Each run owns its own state behind an `Arc`; the scheduler only holds the
//! callback for the next tick. A tick samples the run, delivers the value,
//! and requests the following tick unless the run completed or was stopped.
//! No lock is held while user code runs, so `stop()` may be called from
//! inside the update callback.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::observer::CounterObserver;
use crate::options::AnimatorOptions;
use crate::run::{AnimationRun, RunState, Sample};
use crate::scheduler::{TickScheduler, TickToken};
use crate::token::CancellationToken;
use crate::update::{CounterUpdate, RunEvent};
use crate::CounterError;

type Sink = Box<dyn FnMut(&Sample) + Send>;
type CancelHook = Box<dyn Fn(f64) + Send + Sync>;

struct RunShared {
    run: Mutex<AnimationRun>,
    sink: Mutex<Sink>,
    cancel: CancellationToken,
    pending: Mutex<Option<TickToken>>,
    scheduler: Arc<dyn TickScheduler>,
    on_cancel: Option<CancelHook>,
}

impl RunShared {
    fn schedule(self: &Arc<Self>) {
        let mut pending = self.pending.lock();
        if self.cancel.is_cancelled() {
            return;
        }
        let next = Arc::clone(self);
        *pending = Some(
            self.scheduler
                .request_tick(Box::new(move |now| next.tick(now))),
        );
    }

    fn tick(self: &Arc<Self>, now: f64) {
        if self.cancel.is_cancelled() {
            return;
        }
        let sample = {
            let mut sink = self.sink.lock();
            // stop() may have run on another thread since the first check.
            // A sample committed to the run is always delivered; once stop()
            // cancels the run first, sample() yields nothing.
            if self.cancel.is_cancelled() {
                return;
            }
            let Some(sample) = self.run.lock().sample(now) else {
                return;
            };
            (*sink)(&sample);
            sample
        };
        if !sample.done {
            self.schedule();
        }
    }

    fn stop(&self) {
        if !self.cancel.cancel() {
            return;
        }
        let (cancelled, last_value) = {
            let mut run = self.run.lock();
            (run.cancel(), run.current_value())
        };
        if let Some(token) = self.pending.lock().take() {
            self.scheduler.cancel_tick(token);
        }
        if cancelled {
            debug!(last_value, "counter run stopped");
            if let Some(hook) = &self.on_cancel {
                hook(last_value);
            }
        }
    }
}

/// Handle to a scheduled run.
///
/// Clones refer to the same run. Dropping a handle does not stop the run.
#[derive(Clone)]
pub struct AnimationHandle {
    shared: Arc<RunShared>,
}

impl AnimationHandle {
    /// Stop the run. After the first call no further values are delivered.
    ///
    /// Idempotent, and a no-op after natural completion.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.shared.run.lock().state()
    }

    /// Whether the run reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Last delivered value, or the start value before the first tick.
    #[must_use]
    pub fn last_value(&self) -> f64 {
        self.shared.run.lock().current_value()
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run = self.shared.run.lock();
        f.debug_struct("AnimationHandle")
            .field("start", &run.start())
            .field("end", &run.end())
            .field("state", &run.state())
            .field("value", &run.current_value())
            .finish()
    }
}

/// Starts counter runs on a shared tick scheduler.
#[derive(Clone)]
pub struct CounterAnimator {
    scheduler: Arc<dyn TickScheduler>,
    options: AnimatorOptions,
}

impl CounterAnimator {
    /// Create an animator with default options.
    #[must_use]
    pub fn new(scheduler: Arc<dyn TickScheduler>) -> Self {
        Self::with_options(scheduler, AnimatorOptions::default())
    }

    /// Create an animator with the given options.
    #[must_use]
    pub fn with_options(scheduler: Arc<dyn TickScheduler>, options: AnimatorOptions) -> Self {
        Self {
            scheduler,
            options: options.normalize(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &AnimatorOptions {
        &self.options
    }

    /// Animate from `start` to `end` over `duration_ms`, calling `on_update`
    /// with each displayed value.
    ///
    /// The first value arrives on the next tick; the last one is exactly
    /// `end`. Invalid parameters are rejected before anything is scheduled.
    ///
    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use countup_core::{CounterAnimator, SimulatedClock};
    ///
    /// let clock = Arc::new(SimulatedClock::new());
    /// let animator = CounterAnimator::new(clock.clone());
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    /// animator
    ///     .start(0.0, 150.0, 2000.0, move |v| sink.lock().unwrap().push(v))
    ///     .unwrap();
    /// clock.run_until_idle(100.0, 100);
    /// assert_eq!(seen.lock().unwrap().last(), Some(&150.0));
    /// ```
    pub fn start<F>(
        &self,
        start: f64,
        end: f64,
        duration_ms: f64,
        mut on_update: F,
    ) -> Result<AnimationHandle, CounterError>
    where
        F: FnMut(f64) + Send + 'static,
    {
        let run = self.new_run(start, end, duration_ms)?;
        Ok(self.launch(run, Box::new(move |s: &Sample| on_update(s.value)), None))
    }

    /// Animate a labeled counter, reporting values and lifecycle events to
    /// `observer`.
    pub fn start_observed(
        &self,
        run_index: usize,
        label: impl Into<Arc<str>>,
        start: f64,
        end: f64,
        duration_ms: f64,
        observer: Arc<dyn CounterObserver>,
    ) -> Result<AnimationHandle, CounterError> {
        let label: Arc<str> = label.into();
        let run = self.new_run(start, end, duration_ms)?;

        observer.on_event(&RunEvent::Started {
            run_index,
            label: label.clone(),
            start,
            end,
        });

        let sink_observer = observer.clone();
        let sink_label = label.clone();
        let sink: Sink = Box::new(move |s: &Sample| {
            sink_observer.on_update(&CounterUpdate::from_sample(run_index, sink_label.clone(), s));
            if s.done {
                sink_observer.on_event(&RunEvent::Completed {
                    run_index,
                    label: sink_label.clone(),
                });
            }
        });
        let on_cancel: CancelHook = Box::new(move |last_value| {
            observer.on_event(&RunEvent::Cancelled {
                run_index,
                label: label.clone(),
                last_value,
            });
        });

        Ok(self.launch(run, sink, Some(on_cancel)))
    }

    fn new_run(&self, start: f64, end: f64, duration_ms: f64) -> Result<AnimationRun, CounterError> {
        AnimationRun::new(start, end, duration_ms, self.options.rounding).inspect_err(|e| {
            warn!(start, end, duration_ms, error = %e, "rejected counter run");
        })
    }

    fn launch(&self, run: AnimationRun, sink: Sink, on_cancel: Option<CancelHook>) -> AnimationHandle {
        debug!(
            start = run.start(),
            end = run.end(),
            duration_ms = run.duration_ms(),
            "counter run scheduled"
        );
        let shared = Arc::new(RunShared {
            run: Mutex::new(run),
            sink: Mutex::new(sink),
            cancel: CancellationToken::new(),
            pending: Mutex::new(None),
            scheduler: Arc::clone(&self.scheduler),
            on_cancel,
        });
        shared.schedule();
        AnimationHandle { shared }
    }
}

impl fmt::Debug for CounterAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterAnimator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::observers::{ChannelObserver, CounterMessage};
    use crate::options::Rounding;

    fn setup() -> (Arc<SimulatedClock>, CounterAnimator) {
        let clock = Arc::new(SimulatedClock::new());
        let animator = CounterAnimator::new(clock.clone());
        (clock, animator)
    }

    fn recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(f64) + Send + 'static) {
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = values.clone();
        (values, move |v| sink.lock().push(v))
    }

    #[test]
    fn nothing_delivered_before_first_tick() {
        let (clock, animator) = setup();
        let (values, cb) = recorder();
        let handle = animator.start(0.0, 150.0, 2000.0, cb).unwrap();
        assert!(values.lock().is_empty());
        assert_eq!(clock.pending(), 1);
        assert_eq!(handle.state(), RunState::Running);
    }

    #[test]
    fn counts_up_to_end() {
        let (clock, animator) = setup();
        let (values, cb) = recorder();
        let handle = animator.start(0.0, 150.0, 2000.0, cb).unwrap();

        clock.fire();
        for _ in 0..10 {
            clock.advance(100.0);
        }
        assert_eq!(values.lock().last(), Some(&75.0));

        clock.run_until_idle(100.0, 100);
        let values = values.lock();
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&150.0));
        assert_eq!(handle.state(), RunState::Completed);
        assert_eq!(handle.last_value(), 150.0);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn stop_after_first_callback() {
        let (clock, animator) = setup();
        let (values, cb) = recorder();
        let handle = animator.start(0.0, 12000.0, 2000.0, cb).unwrap();
        clock.fire();
        assert_eq!(values.lock().len(), 1);

        handle.stop();
        assert_eq!(clock.pending(), 0);
        clock.run_until_idle(16.0, 500);
        for _ in 0..200 {
            clock.advance(16.0);
        }
        assert_eq!(values.lock().len(), 1);
        assert_eq!(handle.state(), RunState::Cancelled);

        handle.stop();
        assert_eq!(handle.state(), RunState::Cancelled);
    }

    #[test]
    fn stop_before_first_tick() {
        let (clock, animator) = setup();
        let (values, cb) = recorder();
        let handle = animator.start(0.0, 10.0, 100.0, cb).unwrap();
        handle.stop();
        clock.run_until_idle(10.0, 100);
        assert!(values.lock().is_empty());
        assert_eq!(handle.last_value(), 0.0);
    }

    #[test]
    fn stop_from_inside_callback() {
        let (clock, animator) = setup();
        let slot: Arc<Mutex<Option<AnimationHandle>>> = Arc::new(Mutex::new(None));
        let count = Arc::new(Mutex::new(0usize));

        let inner_slot = slot.clone();
        let inner_count = count.clone();
        let handle = animator
            .start(0.0, 1000.0, 1000.0, move |_| {
                *inner_count.lock() += 1;
                if *inner_count.lock() == 3 {
                    if let Some(h) = inner_slot.lock().as_ref() {
                        h.stop();
                    }
                }
            })
            .unwrap();
        *slot.lock() = Some(handle.clone());

        clock.run_until_idle(50.0, 100);
        assert_eq!(*count.lock(), 3);
        assert_eq!(handle.state(), RunState::Cancelled);
    }

    #[test]
    fn stop_after_completion_is_noop() {
        let (clock, animator) = setup();
        let (_, cb) = recorder();
        let handle = animator.start(0.0, 5.0, 10.0, cb).unwrap();
        clock.run_until_idle(5.0, 100);
        handle.stop();
        handle.stop();
        assert_eq!(handle.state(), RunState::Completed);
    }

    #[test]
    fn descending_run() {
        let (clock, animator) = setup();
        let (values, cb) = recorder();
        animator.start(5000.0, 0.0, 2000.0, cb).unwrap();
        clock.run_until_idle(16.0, 1000);
        let values = values.lock();
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(values.last(), Some(&0.0));
    }

    #[test]
    fn independent_runs_do_not_interfere() {
        let (clock, animator) = setup();
        let (a_values, a_cb) = recorder();
        let (b_values, b_cb) = recorder();
        let a = animator.start(0.0, 100.0, 500.0, a_cb).unwrap();
        let b = animator.start(0.0, 200.0, 500.0, b_cb).unwrap();
        clock.fire();
        clock.advance(100.0);
        a.stop();
        clock.run_until_idle(100.0, 100);

        assert_eq!(a_values.lock().len(), 2);
        assert_eq!(b_values.lock().last(), Some(&200.0));
        assert_eq!(a.state(), RunState::Cancelled);
        assert_eq!(b.state(), RunState::Completed);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let (clock, animator) = setup();
        let (_, cb) = recorder();
        let err = animator.start(0.0, 10.0, 0.0, cb).unwrap_err();
        assert!(matches!(err, CounterError::InvalidConfiguration(_)));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn directional_rounding_descending() {
        let clock = Arc::new(SimulatedClock::new());
        let animator = CounterAnimator::with_options(
            clock.clone(),
            AnimatorOptions {
                rounding: Rounding::Directional,
                ..Default::default()
            },
        );
        let (values, cb) = recorder();
        animator.start(10.0, 0.0, 1000.0, cb).unwrap();
        clock.fire();
        // 10 - 10 * 0.25 = 7.5 -> ceil 8
        clock.advance(250.0);
        assert_eq!(values.lock().last(), Some(&8.0));
    }

    #[test]
    fn observed_run_reports_lifecycle() {
        let (clock, animator) = setup();
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = Arc::new(ChannelObserver::new(tx));
        animator
            .start_observed(1, "Happy Families", 0.0, 5000.0, 100.0, observer)
            .unwrap();
        clock.run_until_idle(25.0, 100);

        let messages: Vec<CounterMessage> = rx.try_iter().collect();
        assert!(matches!(
            messages.first(),
            Some(CounterMessage::Event(RunEvent::Started { run_index: 1, .. }))
        ));
        assert!(matches!(
            messages.last(),
            Some(CounterMessage::Event(RunEvent::Completed { run_index: 1, .. }))
        ));
        let finals: Vec<_> = messages
            .iter()
            .filter_map(|m| match m {
                CounterMessage::Update(u) if u.done => Some(u.value),
                _ => None,
            })
            .collect();
        assert_eq!(finals, vec![5000.0]);
    }

    #[test]
    fn observed_run_reports_cancellation_once() {
        let (clock, animator) = setup();
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = animator
            .start_observed(0, "Prizes Won", 0.0, 12000.0, 2000.0, Arc::new(ChannelObserver::new(tx)))
            .unwrap();
        clock.fire();
        handle.stop();
        handle.stop();
        let cancelled = rx
            .try_iter()
            .filter(|m| matches!(m, CounterMessage::Event(RunEvent::Cancelled { .. })))
            .count();
        assert_eq!(cancelled, 1);
    }

    #[test]
    fn handle_debug_output() {
        let (_clock, animator) = setup();
        let handle = animator.start(0.0, 1.0, 1.0, |_| {}).unwrap();
        let text = format!("{handle:?}");
        assert!(text.contains("Running"));
    }
}
