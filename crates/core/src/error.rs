//! Error types for configuration and command launching

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no files to watch")]
    NoTargets,

    #[error("shell path is empty")]
    EmptyShell,

    #[error("unknown change kind '{0}'")]
    UnknownKind(String),
}

/// Failure to start the configured command
///
/// Never fatal: the caller logs it and keeps watching.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {shell}")]
    Spawn {
        shell: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("launch refused: {0}")]
    Refused(String),
}
