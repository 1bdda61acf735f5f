//! Update and lifecycle payloads delivered to observers.

use std::sync::Arc;

use serde::Serialize;

use crate::run::Sample;

/// One displayed value of a labeled run.
#[derive(Debug, Clone, Serialize)]
pub struct CounterUpdate {
    /// Index of the run within its strip (0 for standalone runs).
    pub run_index: usize,
    /// Label of the counter.
    pub label: Arc<str>,
    /// Displayed value.
    pub value: f64,
    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fraction: f64,
    /// Whether this is the final value of a completed run.
    pub done: bool,
}

impl CounterUpdate {
    /// Build an update from a run sample.
    #[must_use]
    pub fn from_sample(run_index: usize, label: Arc<str>, sample: &Sample) -> Self {
        Self {
            run_index,
            label,
            value: sample.value,
            fraction: sample.fraction,
            done: sample.done,
        }
    }
}

/// Lifecycle notification of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// The run was scheduled.
    Started {
        run_index: usize,
        label: Arc<str>,
        start: f64,
        end: f64,
    },
    /// The run delivered its final value.
    Completed { run_index: usize, label: Arc<str> },
    /// The run was stopped before completion.
    Cancelled {
        run_index: usize,
        label: Arc<str>,
        last_value: f64,
    },
}

impl RunEvent {
    /// Index of the run this event belongs to.
    #[must_use]
    pub fn run_index(&self) -> usize {
        match self {
            RunEvent::Started { run_index, .. }
            | RunEvent::Completed { run_index, .. }
            | RunEvent::Cancelled { run_index, .. } => *run_index,
        }
    }

    /// Label of the run this event belongs to.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            RunEvent::Started { label, .. }
            | RunEvent::Completed { label, .. }
            | RunEvent::Cancelled { label, .. } => label,
        }
    }
}
