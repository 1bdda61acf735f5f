//! CLI strip presenter.

use std::time::Duration;

use countup_core::StatEntry;

use crate::frames::FrameReport;
use crate::output::{format_elapsed, format_stat, format_strip_line};

/// Prints the statistics strip to stdout.
pub struct CLIStripPresenter {
    entries: Vec<StatEntry>,
    quiet: bool,
    frames: bool,
}

impl CLIStripPresenter {
    #[must_use]
    pub fn new(entries: Vec<StatEntry>, quiet: bool, frames: bool) -> Self {
        Self {
            entries,
            quiet,
            frames,
        }
    }

    /// Whether per-frame lines are printed.
    #[must_use]
    pub fn shows_frames(&self) -> bool {
        self.frames && !self.quiet
    }

    #[must_use]
    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    /// Render one frame line, e.g. `[  16ms] Arcade Games 1+ | ...`.
    #[must_use]
    pub fn frame_line(&self, report: &FrameReport) -> String {
        format!(
            "[{}] {}",
            format_elapsed(Duration::from_secs_f64(report.elapsed_ms / 1000.0)),
            format_strip_line(&self.entries, &report.values)
        )
    }

    /// Print one frame, if frame output is enabled.
    pub fn present_frame(&self, report: &FrameReport) {
        if self.shows_frames() {
            println!("{}", self.frame_line(report));
        }
    }

    /// Lines of the final strip.
    #[must_use]
    pub fn final_lines(&self, values: &[f64]) -> Vec<String> {
        let width = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);
        self.entries
            .iter()
            .zip(values)
            .map(|(entry, value)| {
                if self.quiet {
                    format_stat(*value, entry)
                } else {
                    format!("  {:<width$}  {:>10}", entry.label, format_stat(*value, entry))
                }
            })
            .collect()
    }

    /// Print the final strip.
    pub fn present_final(&self, values: &[f64], elapsed: Duration, stopped: bool) {
        for line in self.final_lines(values) {
            println!("{line}");
        }
        if self.quiet {
            return;
        }
        let status = if stopped { "stopped" } else { "done" };
        println!("Duration: {} ({status})", format_elapsed(elapsed).trim());
    }
}
