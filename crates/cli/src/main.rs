//! ontouch - run a command whenever watched files are opened or closed

use anyhow::{Context, Result};
use clap::Parser;
use ontouch_core::{ChangeKind, Config, FileConfig, ShellLauncher, TriggerSet};
use ontouch_watcher::Session;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;

mod logging;
mod shutdown;

/// Watch files for open/close activity and run a command when they are touched
///
/// Press enter to trigger the command by hand.
#[derive(Parser, Debug)]
#[command(name = "ontouch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command to run (through the shell)
    #[arg(short, long)]
    command: Option<String>,

    /// Debounce period in milliseconds (default: 100, 0 disables)
    #[arg(short, long, value_name = "MS")]
    debounce: Option<u64>,

    /// Period to repeat the command in milliseconds (0 disables)
    #[arg(short, long, value_name = "MS")]
    repeat: Option<u64>,

    /// Shell used to run the command (default: /usr/bin/sh)
    #[arg(short, long, value_name = "PATH")]
    shell: Option<PathBuf>,

    /// Print every classified event
    #[arg(short, long)]
    verbose: bool,

    /// Line printed before each command run
    #[arg(long, value_name = "TEXT")]
    separator: Option<String>,

    /// Event kinds that trigger the command (default: open,close-write,close-nowrite)
    #[arg(long = "on", value_name = "KIND", value_delimiter = ',')]
    on: Vec<ChangeKind>,

    /// Read defaults from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Files to watch
    #[arg(value_name = "FILE")]
    targets: Vec<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn into_config(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(path) = &self.config {
            FileConfig::load(path)?.apply(&mut config);
        }

        if let Some(command) = self.command {
            config.command = Some(command);
        }
        if let Some(ms) = self.debounce {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = self.repeat {
            config.set_repeat_ms(ms);
        }
        if let Some(shell) = self.shell {
            config.shell = shell;
        }
        if self.verbose {
            config.verbose = true;
        }
        if let Some(separator) = self.separator {
            config.separator = Some(separator);
        }
        if !self.on.is_empty() {
            config.trigger_on = TriggerSet::new(self.on);
        }
        if !self.targets.is_empty() {
            config.targets = self.targets;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ontouch: {:#}", e);
            return ExitCode::from(2);
        }
    };

    logging::init(config.verbose);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ontouch: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let result = runtime.block_on(async {
        let shutdown = shutdown::install().context("Failed to install signal handlers")?;

        let launcher = Arc::new(ShellLauncher::new(config.separator.clone()));
        let mut session = Session::new(config, launcher)?;

        session
            .run(BufReader::new(tokio::io::stdin()), shutdown)
            .await?;
        Ok(())
    });

    // stdin is read on a blocking thread that can't be cancelled
    runtime.shutdown_background();
    result
}
