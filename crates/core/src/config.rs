//! Runtime configuration
//!
//! `Config` is built once at startup (defaults, then an optional TOML file,
//! then command-line flags) and is read-only afterwards.

use crate::error::ConfigError;
use crate::event::TriggerSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shell used when none is configured
pub const DEFAULT_SHELL: &str = "/usr/bin/sh";

/// Debounce window used when none is configured
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Everything the watcher needs to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Shell command to run on trigger; `None` only classifies events
    pub command: Option<String>,

    /// Shell executable, invoked as `<shell> -c <command>`
    pub shell: PathBuf,

    /// Minimum time between two accepted triggers (zero disables)
    pub debounce: Duration,

    /// Period of the unconditional re-trigger (`None` disables)
    pub repeat: Option<Duration>,

    /// Print event classification lines
    pub verbose: bool,

    /// Line printed before each launched command
    pub separator: Option<String>,

    /// Change kinds that fire the command
    pub trigger_on: TriggerSet,

    /// Watch targets, in argument order
    pub targets: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: None,
            shell: PathBuf::from(DEFAULT_SHELL),
            debounce: DEFAULT_DEBOUNCE,
            repeat: None,
            verbose: false,
            separator: None,
            trigger_on: TriggerSet::default(),
            targets: Vec::new(),
        }
    }
}

impl Config {
    /// Check the invariants the watcher relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.shell.as_os_str().is_empty() {
            return Err(ConfigError::EmptyShell);
        }
        Ok(())
    }

    /// Set the repeat period from milliseconds, zero meaning "off"
    pub fn set_repeat_ms(&mut self, ms: u64) {
        self.repeat = (ms > 0).then(|| Duration::from_millis(ms));
    }
}

/// On-disk configuration file
///
/// Every key is optional; present keys override the defaults and are in
/// turn overridden by command-line flags.
///
/// ```toml
/// command = "make -j4"
/// shell = "/bin/bash"
/// debounce_ms = 250
/// repeat_ms = 0
/// verbose = true
/// separator = "----"
/// trigger_on = ["close-write"]
/// targets = ["src/main.c", "Makefile"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub command: Option<String>,
    pub shell: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub repeat_ms: Option<u64>,
    pub verbose: Option<bool>,
    pub separator: Option<String>,
    pub trigger_on: Option<TriggerSet>,
    pub targets: Option<Vec<PathBuf>>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse config text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Overlay every key present in the file onto `config`
    pub fn apply(self, config: &mut Config) {
        if let Some(command) = self.command {
            config.command = Some(command);
        }
        if let Some(shell) = self.shell {
            config.shell = shell;
        }
        if let Some(ms) = self.debounce_ms {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = self.repeat_ms {
            config.set_repeat_ms(ms);
        }
        if let Some(verbose) = self.verbose {
            config.verbose = verbose;
        }
        if let Some(separator) = self.separator {
            config.separator = Some(separator);
        }
        if let Some(trigger_on) = self.trigger_on {
            config.trigger_on = trigger_on;
        }
        if let Some(targets) = self.targets {
            config.targets = targets;
        }
    }
}
