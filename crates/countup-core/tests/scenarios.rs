//! Concrete counter scenarios on a simulated refresh clock.

use std::sync::Arc;

use parking_lot::Mutex;

use countup_core::observers::{ChannelObserver, CounterMessage};
use countup_core::{
    CounterAnimator, CounterError, RunEvent, RunState, SimulatedClock, SIMULATED_STEP_MS,
};

struct Harness {
    clock: Arc<SimulatedClock>,
    animator: CounterAnimator,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(SimulatedClock::new());
        let animator = CounterAnimator::new(clock.clone());
        Self { clock, animator }
    }
}

fn recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(f64) + Send + 'static) {
    let values = Arc::new(Mutex::new(Vec::new()));
    let sink = values.clone();
    (values, move |v| sink.lock().push(v))
}

/// 0 → 150 over 2 s: midpoint near 75, final exactly 150.
#[test]
fn arcade_games_counter() {
    let h = Harness::new();
    let (values, cb) = recorder();
    let handle = h.animator.start(0.0, 150.0, 2000.0, cb).unwrap();

    h.clock.fire();
    let mut at_half = None;
    while !handle.is_finished() {
        h.clock.advance(10.0);
        if (h.clock.now() - 1000.0).abs() < 1e-6 {
            at_half = values.lock().last().copied();
        }
    }

    let at_half = at_half.expect("no sample at 1000 ms");
    assert!((at_half - 75.0).abs() <= 1.0, "midpoint was {at_half}");
    assert_eq!(values.lock().last(), Some(&150.0));
    assert_eq!(handle.state(), RunState::Completed);
}

/// 0 → 12000, stopped after the first callback: never invoked again.
#[test]
fn prizes_won_stopped_after_first_value() {
    let h = Harness::new();
    let (values, cb) = recorder();
    let handle = h.animator.start(0.0, 12000.0, 2000.0, cb).unwrap();

    h.clock.fire();
    assert_eq!(values.lock().len(), 1);
    handle.stop();

    for _ in 0..300 {
        h.clock.advance(SIMULATED_STEP_MS);
    }
    assert_eq!(values.lock().len(), 1);
    handle.stop();
    assert_eq!(values.lock().len(), 1);
}

/// 5000 → 0: non-increasing, final exactly 0.
#[test]
fn countdown_is_non_increasing() {
    let h = Harness::new();
    let (values, cb) = recorder();
    h.animator.start(5000.0, 0.0, 2000.0, cb).unwrap();
    h.clock.run_until_idle(SIMULATED_STEP_MS, 10_000);

    let values = values.lock();
    assert!(values.len() > 100);
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(values.first(), Some(&5000.0));
    assert_eq!(values.last(), Some(&0.0));
}

/// A frame rate slower than the duration still ends on the target.
#[test]
fn single_late_frame_completes() {
    let h = Harness::new();
    let (values, cb) = recorder();
    h.animator.start(0.0, 450.0, 2000.0, cb).unwrap();
    h.clock.fire();
    h.clock.advance(5000.0);
    assert_eq!(*values.lock(), vec![0.0, 450.0]);
    assert_eq!(h.clock.pending(), 0);
}

/// Rejected configurations never schedule a tick.
#[test]
fn invalid_configurations() {
    let h = Harness::new();
    for (start, end, duration) in [
        (0.0, 1.0, 0.0),
        (0.0, 1.0, -1.0),
        (f64::NAN, 1.0, 1.0),
        (0.0, f64::NEG_INFINITY, 1.0),
    ] {
        let (_, cb) = recorder();
        let err = h.animator.start(start, end, duration, cb).unwrap_err();
        assert!(matches!(err, CounterError::InvalidConfiguration(_)));
    }
    assert_eq!(h.clock.pending(), 0);
}

/// Stopping from another thread prevents further values.
#[test]
fn stop_from_another_thread() {
    let h = Harness::new();
    let (values, cb) = recorder();
    let handle = h.animator.start(0.0, 5000.0, 2000.0, cb).unwrap();
    h.clock.fire();
    h.clock.advance(100.0);

    let remote = handle.clone();
    std::thread::spawn(move || remote.stop()).join().unwrap();

    let delivered = values.lock().len();
    h.clock.run_until_idle(SIMULATED_STEP_MS, 1000);
    assert_eq!(values.lock().len(), delivered);
    assert_eq!(handle.state(), RunState::Cancelled);
}

/// A stop racing the final frame ends either completed with `end` delivered
/// or cancelled at the last delivered value, with exactly one terminal event.
#[test]
fn stop_racing_final_frame_keeps_lifecycle_consistent() {
    for spin in 0..2000 {
        let h = Harness::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = h
            .animator
            .start_observed(0, "race", 0.0, 10.0, 10.0, Arc::new(ChannelObserver::new(tx)))
            .unwrap();
        h.clock.fire();

        let remote = handle.clone();
        let stopper = std::thread::spawn(move || {
            for _ in 0..spin % 200 {
                std::hint::spin_loop();
            }
            remote.stop();
        });
        h.clock.advance(100.0);
        stopper.join().unwrap();

        let mut delivered = Vec::new();
        let mut terminal = Vec::new();
        for msg in rx.try_iter() {
            match msg {
                CounterMessage::Update(u) => delivered.push(u.value),
                CounterMessage::Event(e) => terminal.push(e),
            }
        }
        let terminal: Vec<_> = terminal
            .into_iter()
            .filter(|e| !matches!(e, RunEvent::Started { .. }))
            .collect();
        assert_eq!(terminal.len(), 1, "spin {spin}: {terminal:?}");

        let last = delivered.last().copied();
        match handle.state() {
            RunState::Completed => {
                assert_eq!(last, Some(10.0), "spin {spin}");
                assert!(matches!(terminal[0], RunEvent::Completed { .. }));
            }
            RunState::Cancelled => {
                assert_eq!(Some(handle.last_value()), last, "spin {spin}");
                assert!(matches!(
                    terminal[0],
                    RunEvent::Cancelled { last_value, .. } if Some(last_value) == last
                ));
            }
            RunState::Running => panic!("spin {spin}: run left running"),
        }
    }
}
