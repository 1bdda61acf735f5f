//! # countup-cli
//!
//! Headless presentation of the statistics strip: number formatting,
//! per-frame and final output, a progress-bar view, and shell completion.

pub mod completion;
pub mod frames;
pub mod output;
pub mod presenter;
pub mod progress;
pub mod ui;

pub use frames::{watch_frames, FrameReport};
pub use presenter::CLIStripPresenter;
pub use progress::ProgressStrip;
