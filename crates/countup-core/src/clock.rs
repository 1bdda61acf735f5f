//! Tick scheduler implementations: a deterministic simulated clock and a
//! wall-clock frame loop.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::constants::MAX_FPS;
use crate::error::CounterError;
use crate::scheduler::{FrameQueue, TickCallback, TickScheduler, TickToken};
use crate::token::CancellationToken;

/// Clock that only moves when told to.
///
/// Time starts at `0 ms`; each [`advance`](Self::advance) moves it forward and
/// fires exactly one frame at the new time.
pub struct SimulatedClock {
    queue: FrameQueue,
    now: Mutex<f64>,
}

impl SimulatedClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: FrameQueue::new(),
            now: Mutex::new(0.0),
        }
    }

    /// Current simulated time in milliseconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        *self.now.lock()
    }

    /// Number of ticks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }

    /// Fire a frame at the current time without advancing it.
    pub fn fire(&self) -> usize {
        let now = self.now();
        self.queue.fire(now)
    }

    /// Advance time by `ms` and fire one frame.
    pub fn advance(&self, ms: f64) -> usize {
        let now = {
            let mut now = self.now.lock();
            *now += ms.max(0.0);
            *now
        };
        self.queue.fire(now)
    }

    /// Fire a frame at the current time, then keep advancing by `step_ms`
    /// until nothing is pending or `max_frames` frames have fired.
    ///
    /// Returns the number of frames fired.
    pub fn run_until_idle(&self, step_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        if self.queue.is_idle() {
            return frames;
        }
        self.fire();
        frames += 1;
        while !self.queue.is_idle() && frames < max_frames {
            self.advance(step_ms);
            frames += 1;
        }
        frames
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for SimulatedClock {
    fn request_tick(&self, callback: TickCallback) -> TickToken {
        self.queue.request_tick(callback)
    }

    fn cancel_tick(&self, token: TickToken) {
        self.queue.cancel_tick(token);
    }
}

/// Wall-clock frame source.
///
/// Timestamps are milliseconds since the loop was created.
pub struct FrameLoop {
    queue: FrameQueue,
    origin: Instant,
    frame_interval: Duration,
}

impl FrameLoop {
    /// Create a frame loop firing `fps` frames per second.
    pub fn new(fps: u32) -> Result<Self, CounterError> {
        if fps == 0 || fps > MAX_FPS {
            return Err(CounterError::InvalidConfiguration(format!(
                "frame rate must be between 1 and {MAX_FPS}, got {fps}"
            )));
        }
        Ok(Self::with_interval(Duration::from_secs_f64(
            1.0 / f64::from(fps),
        )))
    }

    /// Create a frame loop with an explicit frame interval.
    #[must_use]
    pub fn with_interval(frame_interval: Duration) -> Self {
        Self {
            queue: FrameQueue::new(),
            origin: Instant::now(),
            frame_interval,
        }
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Milliseconds since the loop was created.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Whether no tick is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_idle()
    }

    /// Number of frames fired so far.
    #[must_use]
    pub fn frames_fired(&self) -> u64 {
        self.queue.frames_fired()
    }

    /// Fire one frame now. For hosts that own their event loop.
    pub fn pump(&self) -> usize {
        self.queue.fire(self.now())
    }

    /// Fire frames every interval until nothing is pending or `cancel` fires.
    ///
    /// Returns `true` if the loop drained, `false` if it was cancelled.
    pub fn run_until_idle(&self, cancel: &CancellationToken) -> bool {
        let mut next = Instant::now();
        while !self.queue.is_idle() {
            if cancel.is_cancelled() {
                debug!(frames = self.frames_fired(), "frame loop cancelled");
                return false;
            }
            self.pump();
            next += self.frame_interval;
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            } else {
                next = now;
            }
        }
        debug!(frames = self.frames_fired(), "frame loop idle");
        true
    }
}

impl TickScheduler for FrameLoop {
    fn request_tick(&self, callback: TickCallback) -> TickToken {
        self.queue.request_tick(callback)
    }

    fn cancel_tick(&self, token: TickToken) {
        self.queue.cancel_tick(token);
    }
}
