//! Animation options and display rounding.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FPS, MAX_FPS};
use crate::error::CounterError;

/// How an interpolated value is turned into a displayed value.
///
/// Every policy is monotonic, so rounding never breaks the ordering of a
/// run's samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round down, whatever the direction.
    #[default]
    Floor,
    /// Truncate toward the start value: floor when counting up, ceil when
    /// counting down.
    Directional,
    /// Round half away from zero.
    Nearest,
    /// Deliver the raw interpolated value.
    None,
}

impl Rounding {
    /// Apply the policy to `value` for a run moving upward when `ascending`.
    #[must_use]
    pub fn apply(self, value: f64, ascending: bool) -> f64 {
        match self {
            Rounding::Floor => value.floor(),
            Rounding::Directional if ascending => value.floor(),
            Rounding::Directional => value.ceil(),
            Rounding::Nearest => value.round(),
            Rounding::None => value,
        }
    }

    /// All policies, in declaration order.
    pub const ALL: [Rounding; 4] = [
        Rounding::Floor,
        Rounding::Directional,
        Rounding::Nearest,
        Rounding::None,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Rounding::Floor => "floor",
            Rounding::Directional => "directional",
            Rounding::Nearest => "nearest",
            Rounding::None => "none",
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rounding {
    type Err = CounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rounding::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CounterError::InvalidConfiguration(format!(
                    "unknown rounding '{s}' (expected floor, directional, nearest or none)"
                ))
            })
    }
}

/// Options shared by every run an animator starts.
#[derive(Debug, Clone)]
pub struct AnimatorOptions {
    /// Display rounding applied to intermediate samples.
    pub rounding: Rounding,
    /// Frame rate of the wall-clock frame loop (0 = default).
    pub fps: u32,
}

impl Default for AnimatorOptions {
    fn default() -> Self {
        Self {
            rounding: Rounding::Floor,
            fps: DEFAULT_FPS,
        }
    }
}

impl AnimatorOptions {
    /// Normalize options, applying defaults where values are zero and
    /// capping the frame rate.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.fps == 0 {
            self.fps = DEFAULT_FPS;
        }
        self.fps = self.fps.min(MAX_FPS);
        self
    }

    /// Time between two frames at the configured rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        let fps = if self.fps == 0 { DEFAULT_FPS } else { self.fps };
        Duration::from_secs_f64(1.0 / f64::from(fps))
    }
}
