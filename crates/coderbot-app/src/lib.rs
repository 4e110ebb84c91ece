//! Coderbot application library
//!
//! Terminal front-end: CLI parsing, configuration layering, the REPL and
//! the terminal display surface.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;

pub use cli::Cli;
pub use config::{AppConfig, ConfigError, ConfigLayer};
pub use display::TerminalDisplay;
