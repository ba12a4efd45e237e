//! Watch table
//!
//! Slot `i` always belongs to `targets[i]`; only the handle in the slot
//! changes across reloads.

use crate::error::{Result, WatchError};
use crate::notification::{EventMask, WatchHandle};
use std::io;
use std::path::{Path, PathBuf};

/// Something that can register and drop watches
pub trait Registrar {
    fn add_watch(&self, path: &Path, mask: EventMask) -> io::Result<WatchHandle>;
    fn remove_watch(&self, handle: WatchHandle) -> io::Result<()>;
}

/// Ordered mapping from target index to watch handle
#[derive(Debug, Clone)]
pub struct WatchTable {
    targets: Vec<PathBuf>,
    /// `None` means "unwatched"
    slots: Vec<Option<WatchHandle>>,
}

impl WatchTable {
    /// Create a table with every target unwatched
    pub fn new(targets: Vec<PathBuf>) -> Self {
        let slots = vec![None; targets.len()];
        Self { targets, slots }
    }

    /// Register every target, in order
    ///
    /// Stops at the first failure: a partial watch set would silently miss
    /// files, so the caller must treat the error as fatal.
    pub fn load<R: Registrar + ?Sized>(&mut self, registrar: &R, mask: EventMask) -> Result<()> {
        for (target, slot) in self.targets.iter().zip(self.slots.iter_mut()) {
            tracing::info!("Loading {}", target.display());

            let handle = registrar
                .add_watch(target, mask)
                .map_err(|source| WatchError::Register {
                    path: target.clone(),
                    source,
                })?;
            *slot = Some(handle);
        }
        Ok(())
    }

    /// Drop every held watch, then register all targets again
    ///
    /// Removal errors are ignored: reload usually runs because a handle was
    /// already invalidated by the kernel.
    pub fn reload<R: Registrar + ?Sized>(&mut self, registrar: &R, mask: EventMask) -> Result<()> {
        for slot in self.slots.iter_mut() {
            if let Some(handle) = slot.take() {
                if let Err(e) = registrar.remove_watch(handle) {
                    tracing::trace!(wd = handle.as_raw(), "rm_watch ignored: {}", e);
                }
            }
        }
        self.load(registrar, mask)
    }

    /// Index of the target watched through `handle`
    pub fn index_of(&self, handle: WatchHandle) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(handle))
    }

    /// Path watched through `handle`
    pub fn path_of(&self, handle: WatchHandle) -> Option<&Path> {
        self.index_of(handle).map(|i| self.targets[i].as_path())
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    pub fn handles(&self) -> &[Option<WatchHandle>] {
        &self.slots
    }

    /// Every slot holds a handle
    pub fn is_fully_watched(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
