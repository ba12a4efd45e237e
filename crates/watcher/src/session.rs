//! Event loop
//!
//! A `Session` owns everything the watcher needs at runtime: the
//! configuration, the inotify channel, the watch table and the trigger
//! engine. `run` waits on operator input, inotify readiness, the periodic
//! timer and a shutdown future in a single `select!`, so all state is only
//! ever touched from one task.

use crate::debounce::Trigger;
use crate::error::{Result, WatchError};
use crate::notification::{decode, EventMask, Notification, RECORD_SIZE};
use crate::periodic::Periodic;
use crate::platform::InotifyChannel;
use crate::table::WatchTable;
use ontouch_core::{Config, ProcessLauncher};
use std::future::Future;
use std::sync::Arc;
use tokio::io::unix::AsyncFd;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct Session {
    config: Config,
    mask: EventMask,
    channel: AsyncFd<InotifyChannel>,
    table: WatchTable,
    trigger: Arc<Trigger>,
}

impl Session {
    /// Open the inotify channel and register every target
    ///
    /// Must be called from inside a tokio runtime with I/O enabled.
    pub fn new(config: Config, launcher: Arc<dyn ProcessLauncher>) -> Result<Self> {
        let trigger = Arc::new(Trigger::new(&config, launcher));
        Self::with_trigger(config, trigger)
    }

    /// Like `new`, with a caller-built trigger engine
    pub fn with_trigger(config: Config, trigger: Arc<Trigger>) -> Result<Self> {
        let channel = InotifyChannel::open()?;
        // SAFETY: the channel owns its fd and only closes it when dropped
        let channel =
            unsafe { AsyncFd::register(channel) }.map_err(|e| WatchError::Init(e.into()))?;
        let mask = EventMask::watch_mask(&config.trigger_on);

        let mut table = WatchTable::new(config.targets.clone());
        table.load(channel.get_ref(), mask)?;

        Ok(Self {
            config,
            mask,
            channel,
            table,
            trigger,
        })
    }

    pub fn table(&self) -> &WatchTable {
        &self.table
    }

    pub fn trigger(&self) -> &Arc<Trigger> {
        &self.trigger
    }

    /// Run until `shutdown` completes or a fatal error occurs
    ///
    /// Every line read from `input` is a manual trigger, whatever its bytes.
    /// End of input only disables that source; the loop keeps watching.
    pub async fn run<I, S>(&mut self, mut input: I, shutdown: S) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut line = Vec::new();
        let mut input_open = true;
        let mut periodic = Periodic::new(self.config.repeat);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    return Ok(());
                }

                read = input.read_until(b'\n', &mut line), if input_open => match read {
                    Ok(0) => {
                        tracing::debug!("Operator input closed");
                        input_open = false;
                    }
                    Ok(_) => {
                        line.clear();
                        tracing::debug!("Manual trigger");
                        self.trigger.fire();
                    }
                    Err(e) => return Err(WatchError::Input(e)),
                },

                _ = periodic.tick() => {
                    tracing::debug!("Periodic trigger");
                    self.trigger.fire();
                }

                ready = self.channel.readable() => {
                    let mut guard = ready.map_err(WatchError::Read)?;
                    let mut buf = [0u8; RECORD_SIZE];

                    let n = match guard.try_io(|fd| fd.get_ref().read_raw(&mut buf)) {
                        Ok(Ok(n)) => n,
                        Ok(Err(e)) => return Err(WatchError::Read(e)),
                        // spurious wakeup, readiness already cleared
                        Err(_would_block) => continue,
                    };
                    drop(guard);

                    self.process_record(&buf[..n])?;
                }
            }
        }
    }

    /// Decode and dispatch the bytes of one read
    pub(crate) fn process_record(&mut self, bytes: &[u8]) -> Result<()> {
        let record = decode(bytes)?;
        self.dispatch(record)
    }

    fn dispatch(&mut self, record: Notification) -> Result<()> {
        if record.is_overflow() {
            tracing::warn!("inotify queue overflowed, events were lost");
            self.trigger.fire();
            return Ok(());
        }

        let Some(path) = self.table.path_of(record.watch).map(|p| p.to_path_buf()) else {
            // echo of our own rm_watch during a reload
            tracing::debug!(wd = record.watch.as_raw(), mask = ?record.mask, "Record for stale watch");
            return Ok(());
        };

        if self.config.verbose {
            for kind in record.kinds() {
                println!("{}: {}", path.display(), kind);
            }
        }

        if record.triggers(&self.config.trigger_on) {
            self.trigger.fire();
        }

        if record.is_invalidated() {
            if self.config.verbose {
                println!("{}: invalidated", path.display());
            }
            tracing::warn!("Watch on {} invalidated, reloading", path.display());
            self.table.reload(self.channel.get_ref(), self.mask)?;
        }

        Ok(())
    }
}
