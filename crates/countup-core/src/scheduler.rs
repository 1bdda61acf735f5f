//! Tick scheduling capability.
//!
//! The animator never reads a clock directly. It asks a [`TickScheduler`] for
//! the next display refresh and receives the frame timestamp when that
//! refresh happens. [`FrameQueue`] is the shared bookkeeping both clock
//! implementations build on.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Callback fired on a tick, with the frame timestamp in milliseconds.
pub type TickCallback = Box<dyn FnOnce(f64) + Send>;

/// Identifies one requested tick, for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

impl TickToken {
    /// Raw token id.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of display refresh ticks.
pub trait TickScheduler: Send + Sync {
    /// Request that `callback` runs on the next frame.
    fn request_tick(&self, callback: TickCallback) -> TickToken;

    /// Cancel a requested tick. Unknown or already fired tokens are ignored.
    fn cancel_tick(&self, token: TickToken);
}

/// Queue of ticks waiting for the next frame.
///
/// Firing a frame drains the queue before running any callback, so ticks
/// requested from inside a callback land on the following frame and no lock
/// is held while user code runs.
pub struct FrameQueue {
    pending: Mutex<Vec<(TickToken, TickCallback)>>,
    next_id: AtomicU64,
    frames_fired: AtomicU64,
}

impl FrameQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            frames_fired: AtomicU64::new(0),
        }
    }

    /// Number of ticks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether no tick is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Number of frames fired so far.
    #[must_use]
    pub fn frames_fired(&self) -> u64 {
        self.frames_fired.load(Ordering::Relaxed)
    }

    /// Fire one frame at `now`, running every tick queued before the call.
    ///
    /// Returns the number of callbacks run.
    pub fn fire(&self, now: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.lock());
        self.frames_fired.fetch_add(1, Ordering::Relaxed);
        let count = due.len();
        for (_, callback) in due {
            callback(now);
        }
        count
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for FrameQueue {
    fn request_tick(&self, callback: TickCallback) -> TickToken {
        let token = TickToken(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.pending.lock().push((token, callback));
        token
    }

    fn cancel_tick(&self, token: TickToken) {
        self.pending.lock().retain(|(t, _)| *t != token);
    }
}
