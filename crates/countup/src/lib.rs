//! countup library: configuration, dispatch and exit codes of the binary.

pub mod app;
pub mod config;
pub mod errors;
