//! TUI message types (Elm Messages).

use std::sync::Arc;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// A counter was (re)started.
    Started {
        index: usize,
        label: Arc<str>,
        target: f64,
    },
    /// New displayed value of a counter.
    Value {
        index: usize,
        value: f64,
        fraction: f64,
    },
    /// A counter reached its target.
    Completed { index: usize },
    /// A counter was stopped early.
    Stopped { index: usize, last_value: f64 },
    /// Log line.
    Log(String),
    /// Error line.
    Error(String),
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(crate::keymap::KeyAction),
    /// Quit the application.
    Quit,
}
