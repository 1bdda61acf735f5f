//! Per-frame strip reporting.
//!
//! A frame watcher is an extra tick client that re-requests itself every
//! frame until the strip has finished. Since it is queued after the strip's
//! runs, it always observes the values delivered in the same frame.

use std::sync::Arc;

use parking_lot::Mutex;

use countup_core::{StripHandle, TickScheduler};

/// Snapshot of the strip after one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Milliseconds since the first watched frame.
    pub elapsed_ms: f64,
    /// Displayed values in strip order.
    pub values: Vec<f64>,
    /// Whether every run has reached a terminal state.
    pub finished: bool,
}

struct FrameWatch<F> {
    scheduler: Arc<dyn TickScheduler>,
    strip: StripHandle,
    state: Mutex<WatchState<F>>,
}

struct WatchState<F> {
    on_frame: F,
    first_timestamp: Option<f64>,
    frame: u64,
}

impl<F> FrameWatch<F>
where
    F: FnMut(&FrameReport) + Send + 'static,
{
    fn schedule(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.scheduler
            .request_tick(Box::new(move |now| this.tick(now)));
    }

    fn tick(self: Arc<Self>, now: f64) {
        let finished = self.strip.all_finished();
        {
            let mut state = self.state.lock();
            let first = *state.first_timestamp.get_or_insert(now);
            let report = FrameReport {
                frame: state.frame,
                elapsed_ms: (now - first).max(0.0),
                values: self.strip.values(),
                finished,
            };
            state.frame += 1;
            (state.on_frame)(&report);
        }
        if !finished {
            self.schedule();
        }
    }
}

/// Call `on_frame` once per frame with the strip values, until the strip
/// finishes. The last report has `finished` set.
///
/// Must be called after the strip was started on the same scheduler.
pub fn watch_frames<F>(scheduler: Arc<dyn TickScheduler>, strip: StripHandle, on_frame: F)
where
    F: FnMut(&FrameReport) + Send + 'static,
{
    let watch = Arc::new(FrameWatch {
        scheduler,
        strip,
        state: Mutex::new(WatchState {
            on_frame,
            first_timestamp: None,
            frame: 0,
        }),
    });
    watch.schedule();
}
