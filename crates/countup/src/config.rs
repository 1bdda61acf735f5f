//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use countup_core::constants::MAX_FPS;
use countup_core::{AnimatorOptions, CounterError, CounterStrip, Rounding, DEFAULT_FPS};

/// countup: animated statistic counters for the terminal.
#[derive(Parser, Debug)]
#[command(name = "countup", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Animation duration (e.g. "2s", "1500ms", "1.5s", "1m").
    #[arg(long, default_value = "2s", env = "COUNTUP_DURATION")]
    pub duration: String,

    /// Frames per second of the animation.
    #[arg(long, default_value_t = DEFAULT_FPS, env = "COUNTUP_FPS")]
    pub fps: u32,

    /// Value every counter starts from.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub from: f64,

    /// JSON file with the statistics to show ({"stats": [{"label", "value", "suffix"}]}).
    #[arg(long, env = "COUNTUP_STATS")]
    pub stats: Option<PathBuf>,

    /// Rounding of intermediate values: floor, directional, nearest or none.
    #[arg(long, default_value = "floor")]
    pub rounding: Rounding,

    /// Drive a simulated clock instead of the wall clock (instant, deterministic).
    #[arg(long)]
    pub simulate: bool,

    /// Print every frame instead of only the final strip.
    #[arg(long)]
    pub frames: bool,

    /// Quiet mode (only the final values).
    #[arg(short, long)]
    pub quiet: bool,

    /// Launch the interactive dashboard.
    #[arg(long, conflicts_with = "simulate")]
    pub tui: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Write the final strip as JSON to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Animation duration in milliseconds.
    pub fn duration_ms(&self) -> Result<f64, CounterError> {
        parse_duration(&self.duration)
            .map(|d| d.as_secs_f64() * 1000.0)
            .ok_or_else(|| CounterError::Config(format!("invalid duration '{}'", self.duration)))
    }

    /// Milliseconds between frames.
    pub fn frame_step_ms(&self) -> Result<f64, CounterError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(CounterError::InvalidConfiguration(format!(
                "frame rate must be between 1 and {MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(1000.0 / f64::from(self.fps))
    }

    #[must_use]
    pub fn animator_options(&self) -> AnimatorOptions {
        AnimatorOptions {
            rounding: self.rounding,
            fps: self.fps,
        }
    }

    /// Build and validate the strip to animate.
    pub fn load_strip(&self) -> Result<CounterStrip, CounterError> {
        let strip = match &self.stats {
            Some(path) => CounterStrip::load(path)?,
            None => CounterStrip::default(),
        }
        .from_value(self.from)
        .duration_ms(self.duration_ms()?);
        strip.validate()?;
        Ok(strip)
    }
}

/// Parse a duration string like "2s", "1500ms", "1.5s", "1m" or "2" (seconds).
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (number, scale) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, 0.001)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1.0)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, 60.0)
    } else {
        (s, 1.0)
    };
    let value: f64 = number.trim().parse().ok()?;
    let secs = value * scale;
    if !secs.is_finite() || secs < 0.0 || secs > 86_400.0 {
        return None;
    }
    Some(Duration::from_secs_f64(secs))
}
