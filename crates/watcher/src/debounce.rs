//! Debounced command triggering
//!
//! Bursts of filesystem activity (an editor save is typically open, write,
//! close and chmod in quick succession) collapse into a single launch: a
//! trigger is accepted only if at least the debounce window has elapsed
//! since the previous accepted one.

use crate::clock::{Clock, SystemClock};
use ontouch_core::{Config, ProcessLauncher};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a single `fire` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Accepted and the command was started
    Launched,
    /// Accepted, but there is no command to run
    NoCommand,
    /// Rejected: inside the debounce window of the previous trigger
    Debounced,
    /// Accepted, but the command failed to start
    LaunchFailed,
}

impl FireOutcome {
    /// Whether the debounce window was reset by this call
    pub fn accepted(self) -> bool {
        !matches!(self, FireOutcome::Debounced)
    }
}

/// Trigger engine: owns the debounce clock and the launch decision
///
/// `fire` may be called from several threads at once. The clock is only
/// locked for the read-compare-write; the launch itself runs unlocked.
pub struct Trigger {
    command: Option<String>,
    shell: PathBuf,
    debounce: Duration,

    /// Time of the last accepted trigger (`None` = never fired)
    last_fired: Mutex<Option<Instant>>,

    clock: Arc<dyn Clock>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl Trigger {
    /// Create a trigger engine reading the system clock
    pub fn new(config: &Config, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self::with_clock(config, launcher, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &Config,
        launcher: Arc<dyn ProcessLauncher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            command: config.command.clone(),
            shell: config.shell.clone(),
            debounce: config.debounce,
            last_fired: Mutex::new(None),
            clock,
            launcher,
        }
    }

    /// Evaluate the debounce window and launch the command if accepted
    pub fn fire(&self) -> FireOutcome {
        if !self.accept() {
            tracing::debug!("Debounce hit");
            return FireOutcome::Debounced;
        }

        let Some(command) = &self.command else {
            return FireOutcome::NoCommand;
        };

        match self.launcher.launch(&self.shell, command) {
            Ok(()) => FireOutcome::Launched,
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(cause) => tracing::error!("Failed to launch command: {}: {}", e, cause),
                    None => tracing::error!("Failed to launch command: {}", e),
                }
                FireOutcome::LaunchFailed
            }
        }
    }

    /// Time of the last accepted trigger
    pub fn last_fired(&self) -> Option<Instant> {
        *self.last_fired.lock()
    }

    /// Read-compare-write on the debounce clock, atomically
    fn accept(&self) -> bool {
        let mut last = self.last_fired.lock();
        let now = self.clock.now();

        if let Some(previous) = *last {
            if now.saturating_duration_since(previous) < self.debounce {
                return false;
            }
        }

        *last = Some(now);
        true
    }
}
