//! Core types for ontouch
//!
//! This crate provides:
//! - Runtime configuration (defaults, TOML file overlay, validation)
//! - The change-kind vocabulary and trigger sets
//! - The command launcher capability and its shell implementation

pub mod config;
pub mod error;
pub mod event;
pub mod launcher;

// Re-exports
pub use config::{Config, FileConfig, DEFAULT_DEBOUNCE, DEFAULT_SHELL};
pub use error::{ConfigError, LaunchError};
pub use event::{ChangeKind, TriggerSet};
pub use launcher::{ProcessLauncher, RecordingLauncher, ShellLauncher};
