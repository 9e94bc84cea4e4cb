//! Sketcher Application
//!
//! Command line shell around the editor core: configuration, document
//! storage wiring and replay of scripted editing sessions.

pub mod config;
pub mod script;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use script::{ReplaySummary, Script, ScriptError, Step};
pub use session::{AppError, SessionOptions, new_editor, run_session};
