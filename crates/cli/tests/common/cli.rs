//! CLI process helpers
//!
//! Wraps the `ontouch` binary so tests can start it against scratch files,
//! poke it through stdin and signals, and collect its output.

use anyhow::{Context, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::{Duration, Instant};

/// Time given to a freshly started watcher to register its targets
pub const STARTUP: Duration = Duration::from_millis(400);

/// Time given to the watcher to react to a change
pub const SETTLE: Duration = Duration::from_millis(400);

/// Command builder for the `ontouch` binary
pub struct OntouchCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
}

impl OntouchCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_ontouch")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("RUST_LOG")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Start the watcher and wait for it to register its targets
    pub fn spawn(&self) -> Result<Running> {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .spawn()
            .context("Failed to spawn ontouch")?;
        let stdin = child.stdin.take();

        std::thread::sleep(STARTUP);
        Ok(Running {
            child: Some(child),
            stdin,
        })
    }

    /// Run to completion with closed stdin, for invocations expected to exit on their own
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .context("Failed to execute ontouch")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }
}

/// A running watcher process
pub struct Running {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl Running {
    /// Type a line on the watcher's stdin
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().context("stdin already closed")?;
        writeln!(stdin, "{}", line)?;
        stdin.flush()?;
        Ok(())
    }

    /// Close the watcher's stdin
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Whether the process is still running
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Deliver `signal` and collect everything the process printed
    pub fn stop_with(mut self, signal: Signal) -> Result<CommandResult> {
        let child = self.child.as_ref().context("process already reaped")?;
        kill(Pid::from_raw(child.id() as i32), signal).context("Failed to signal ontouch")?;
        self.wait()
    }

    /// Interrupt like Ctrl-C would
    pub fn interrupt(self) -> Result<CommandResult> {
        self.stop_with(Signal::SIGINT)
    }

    /// Wait for the process to exit on its own
    pub fn wait(mut self) -> Result<CommandResult> {
        let start = Instant::now();
        self.stdin.take();
        let output = self
            .child
            .take()
            .context("process already reaped")?
            .wait_with_output()
            .context("Failed to wait for ontouch")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Process result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Number of lines in `path`, zero if it doesn't exist yet
pub fn count_lines(path: &Path) -> usize {
    std::fs::read_to_string(path)
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

/// Shell command appending one line to `marker` per run
pub fn append_to(marker: &Path) -> String {
    format!("echo run >> '{}'", marker.display())
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// ontouch!(dir, "-c", "make", "src/main.c").spawn()?;
/// ```
#[macro_export]
macro_rules! ontouch {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::OntouchCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
