//! Error handling and exit codes.

use countup_core::{exit_codes, CounterError};

/// Exit code for a counter error.
#[must_use]
pub fn handle_error(err: &CounterError) -> i32 {
    match err {
        CounterError::InvalidConfiguration(_) | CounterError::Config(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for any error surfaced by the application.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CounterError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
