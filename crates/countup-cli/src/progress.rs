//! Progress-bar view of the strip.

use std::borrow::Cow;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use countup_core::{CounterObserver, CounterUpdate, RunEvent, StatEntry};

use crate::output::format_stat;

/// Bar resolution: one tick per thousandth of the run.
const BAR_LENGTH: u64 = 1000;

/// One progress bar per strip entry, updated from counter observations.
pub struct ProgressStrip {
    multi: MultiProgress,
    bars: Vec<ProgressBar>,
    entries: Vec<StatEntry>,
}

impl ProgressStrip {
    /// Bars drawn on stderr. Hidden automatically when stderr is not a terminal.
    #[must_use]
    pub fn new(entries: Vec<StatEntry>) -> Self {
        Self::with_draw_target(entries, ProgressDrawTarget::stderr())
    }

    #[must_use]
    pub fn with_draw_target(entries: Vec<StatEntry>, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let style = ProgressStyle::with_template("{prefix:>16} [{bar:30.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bars = entries
            .iter()
            .map(|entry| {
                let bar = multi.add(ProgressBar::new(BAR_LENGTH));
                bar.set_style(style.clone());
                bar.set_prefix(entry.label.clone());
                bar
            })
            .collect();
        Self {
            multi,
            bars,
            entries,
        }
    }

    /// Position of one bar, if the index exists.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<u64> {
        self.bars.get(index).map(ProgressBar::position)
    }

    /// Whether one bar has been finished or abandoned.
    #[must_use]
    pub fn is_finished(&self, index: usize) -> bool {
        self.bars.get(index).is_some_and(ProgressBar::is_finished)
    }

    /// Remove the bars from the terminal.
    pub fn clear(&self) {
        if let Err(e) = self.multi.clear() {
            tracing::debug!(error = %e, "failed to clear progress bars");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_position(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * BAR_LENGTH as f64) as u64
}

impl CounterObserver for ProgressStrip {
    fn on_update(&self, update: &CounterUpdate) {
        let (Some(bar), Some(entry)) = (self.bars.get(update.run_index), self.entries.get(update.run_index))
        else {
            return;
        };
        bar.set_position(bar_position(update.fraction));
        bar.set_message(Cow::Owned(format_stat(update.value, entry)));
    }

    fn on_event(&self, event: &RunEvent) {
        let Some(bar) = self.bars.get(event.run_index()) else {
            return;
        };
        match event {
            RunEvent::Started { .. } => {}
            RunEvent::Completed { .. } => bar.finish(),
            RunEvent::Cancelled { .. } => bar.abandon(),
        }
    }
}
