//! # countup-tui
//!
//! Interactive dashboard showing the statistics strip as cards, using
//! ratatui with Elm architecture. Counter observations arrive as messages on
//! a channel; the event loop pumps the frame source between key polls.

pub mod bridge;
pub mod cards;
pub mod driver;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;

pub use bridge::TuiBridgeObserver;
pub use driver::StripDriver;
pub use logs::LogScrollState;
pub use messages::TuiMessage;
pub use model::{CardState, CardStatus, TuiApp};
