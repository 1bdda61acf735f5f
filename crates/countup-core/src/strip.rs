//! The statistics strip: a row of labeled counters animated together.
//!
//! Every entry gets its own run, counting from a common start value to the
//! entry's value. The runs share nothing but the scheduler, so stopping one
//! never disturbs the others.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animator::{AnimationHandle, CounterAnimator};
use crate::constants::{DEFAULT_DURATION_MS, DEFAULT_SUFFIX};
use crate::error::{validate_run, CounterError};
use crate::format::format_value;
use crate::observer::CounterObserver;

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// One statistic shown in the strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Caption under the number.
    pub label: String,
    /// Target value.
    pub value: f64,
    /// Text appended to the displayed number.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl StatEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            suffix: default_suffix(),
        }
    }

    /// Displayed text for `value`, e.g. `12,000+`.
    #[must_use]
    pub fn display(&self, value: f64) -> String {
        format!("{}{}", format_value(value), self.suffix)
    }
}

/// On-disk form of a strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripDocument {
    pub stats: Vec<StatEntry>,
}

/// A set of counters started and stopped together.
#[derive(Debug, Clone)]
pub struct CounterStrip {
    entries: Vec<StatEntry>,
    from: f64,
    duration_ms: f64,
}

impl Default for CounterStrip {
    fn default() -> Self {
        Self {
            entries: vec![
                StatEntry::new("Arcade Games", 150.0),
                StatEntry::new("Happy Families", 5000.0),
                StatEntry::new("Prizes Won", 12000.0),
                StatEntry::new("Parties Hosted", 450.0),
            ],
            from: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl CounterStrip {
    /// Create a strip from explicit entries. An empty list is rejected.
    pub fn new(entries: Vec<StatEntry>) -> Result<Self, CounterError> {
        if entries.is_empty() {
            return Err(CounterError::InvalidConfiguration(
                "a strip needs at least one statistic".into(),
            ));
        }
        Ok(Self {
            entries,
            ..Self::default()
        })
    }

    /// Parse a strip from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CounterError> {
        let doc: StripDocument =
            serde_json::from_str(json).map_err(|e| CounterError::Config(e.to_string()))?;
        Self::new(doc.stats)
    }

    /// Load a strip from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CounterError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CounterError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Set the common start value.
    #[must_use]
    pub fn from_value(mut self, from: f64) -> Self {
        self.from = from;
        self
    }

    /// Set the duration shared by every run.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Common start value of every run.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry against the start value and duration.
    pub fn validate(&self) -> Result<(), CounterError> {
        for entry in &self.entries {
            validate_run(self.from, entry.value, self.duration_ms).map_err(|e| match e {
                CounterError::InvalidConfiguration(msg) => {
                    CounterError::InvalidConfiguration(format!("{}: {msg}", entry.label))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Start one run per entry, reporting to `observer`.
    ///
    /// Fails without scheduling anything if any entry is invalid.
    pub fn start(
        &self,
        animator: &CounterAnimator,
        observer: &Arc<dyn CounterObserver>,
    ) -> Result<StripHandle, CounterError> {
        self.validate()?;

        let handles = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                animator.start_observed(
                    index,
                    entry.label.as_str(),
                    self.from,
                    entry.value,
                    self.duration_ms,
                    Arc::clone(observer),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(runs = handles.len(), duration_ms = self.duration_ms, "strip started");
        Ok(StripHandle { handles })
    }
}

/// Handles of every run in a started strip.
#[derive(Debug, Clone)]
pub struct StripHandle {
    handles: Vec<AnimationHandle>,
}

impl StripHandle {
    /// Stop every run. Idempotent.
    pub fn stop_all(&self) {
        for handle in &self.handles {
            handle.stop();
        }
    }

    /// Whether every run reached a terminal state.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.handles.iter().all(AnimationHandle::is_finished)
    }

    /// Handle of one run.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AnimationHandle> {
        self.handles.get(index)
    }

    /// Last delivered value of every run, in strip order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.handles.iter().map(AnimationHandle::last_value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
