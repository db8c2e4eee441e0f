//! HTTP front end for the AgriSmart assistant.
//!
//! Exposes one JSON route per [`advisor::Advisor`] operation, plus the
//! command line configuration and logging setup used by the binary.

pub mod config;
pub mod logging;
pub mod web;

pub use config::Cli;
pub use logging::init_logging;
pub use web::{AppState, app};
