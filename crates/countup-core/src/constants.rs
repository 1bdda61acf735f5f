//! Constants for counter animation defaults.

/// Default animation duration in milliseconds (two seconds).
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Default frame rate of the wall-clock frame loop.
pub const DEFAULT_FPS: u32 = 60;

/// Highest frame rate accepted by the frame loop.
pub const MAX_FPS: u32 = 1000;

/// Fixed step used when replaying on a simulated clock (one 60 Hz frame).
pub const SIMULATED_STEP_MS: f64 = 1000.0 / 60.0;

/// Upper bound on frames fired by `run_until_idle` on a simulated clock.
pub const MAX_SIMULATED_FRAMES: usize = 1_000_000;

/// Minimum value change before `LoggingObserver` emits a debug event.
pub const LOG_VALUE_THRESHOLD: f64 = 1.0;

/// Suffix appended to strip values, as in "150+".
pub const DEFAULT_SUFFIX: &str = "+";

/// Exit codes for the `countup` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Animation interrupted by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
