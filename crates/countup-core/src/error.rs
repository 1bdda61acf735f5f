//! Error type for counter animation.

/// Errors reported synchronously by the animator, clocks and strip loader.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// A run or scheduler was configured with values it cannot animate.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A strip definition could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CounterError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Validate the parameters of a run.
///
/// `duration_ms` must be finite and strictly positive, `start` and `end`
/// must be finite.
pub fn validate_run(start: f64, end: f64, duration_ms: f64) -> Result<(), CounterError> {
    if !start.is_finite() {
        return Err(CounterError::invalid(format!("start must be finite, got {start}")));
    }
    if !end.is_finite() {
        return Err(CounterError::invalid(format!("end must be finite, got {end}")));
    }
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return Err(CounterError::invalid(format!(
            "duration must be a positive number of milliseconds, got {duration_ms}"
        )));
    }
    Ok(())
}
