//! Command launching
//!
//! Triggered commands run as `<shell> -c <command>` in a child process that
//! shares our stdout/stderr. Nobody waits on the child: its handle is
//! dropped right after spawn, the runtime reaps it in the background once it
//! exits, and it may outlive us.

use crate::error::LaunchError;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Capability to start the configured command
pub trait ProcessLauncher: Send + Sync {
    /// Start `shell -c command` without waiting for it
    fn launch(&self, shell: &Path, command: &str) -> Result<(), LaunchError>;
}

/// Launches commands as real child processes
///
/// Must be used from inside a tokio runtime, which reaps exited children.
#[derive(Debug, Default, Clone)]
pub struct ShellLauncher {
    separator: Option<String>,
}

impl ShellLauncher {
    pub fn new(separator: Option<String>) -> Self {
        Self { separator }
    }
}

impl ProcessLauncher for ShellLauncher {
    fn launch(&self, shell: &Path, command: &str) -> Result<(), LaunchError> {
        if let Some(separator) = &self.separator {
            println!("{}", separator);
        }

        let child = Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                shell: shell.to_path_buf(),
                source,
            })?;

        tracing::debug!(pid = ?child.id(), "Launched: {}", command);
        Ok(())
    }
}

/// In-memory launcher that records invocations instead of spawning
///
/// Used to exercise triggering logic without creating processes.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launches: Mutex<Vec<(PathBuf, String)>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose every launch fails (still recorded)
    pub fn failing() -> Self {
        Self {
            launches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of launches attempted so far
    pub fn count(&self) -> usize {
        self.launches.lock().len()
    }

    /// Snapshot of every `(shell, command)` launched so far
    pub fn launches(&self) -> Vec<(PathBuf, String)> {
        self.launches.lock().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, shell: &Path, command: &str) -> Result<(), LaunchError> {
        self.launches
            .lock()
            .push((shell.to_path_buf(), command.to_string()));

        if self.fail {
            return Err(LaunchError::Refused(command.to_string()));
        }
        Ok(())
    }
}
