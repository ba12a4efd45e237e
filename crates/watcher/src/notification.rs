//! Typed view of inotify records
//!
//! The kernel hands out `struct inotify_event` headers:
//!
//! ```text
//! offset  size  field
//!      0     4  wd      (i32)
//!      4     4  mask    (u32)
//!      8     4  cookie  (u32)
//!     12     4  len     (u32, bytes of name that follow)
//! ```
//!
//! All fields are native-endian. Watches on plain files never carry a name,
//! so a record is exactly `RECORD_SIZE` bytes. Rename cookies are not
//! used: a replaced target is picked up through its invalidation instead.

use crate::error::{Result, WatchError};
use bitflags::bitflags;
use ontouch_core::{ChangeKind, TriggerSet};

/// Size of one inotify record header
pub const RECORD_SIZE: usize = 16;

bitflags! {
    /// Raw inotify event bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventMask: u32 {
        const ACCESS = 0x0000_0001;
        const MODIFY = 0x0000_0002;
        const ATTRIB = 0x0000_0004;
        const CLOSE_WRITE = 0x0000_0008;
        const CLOSE_NOWRITE = 0x0000_0010;
        const OPEN = 0x0000_0020;
        const MOVED_FROM = 0x0000_0040;
        const MOVED_TO = 0x0000_0080;
        const CREATE = 0x0000_0100;
        const DELETE = 0x0000_0200;
        const DELETE_SELF = 0x0000_0400;
        const MOVE_SELF = 0x0000_0800;

        const UNMOUNT = 0x0000_2000;
        const Q_OVERFLOW = 0x0000_4000;
        /// Watch was removed (explicitly, or because the inode went away)
        const IGNORED = 0x0000_8000;
        const ISDIR = 0x4000_0000;

        const CLOSE = Self::CLOSE_WRITE.bits() | Self::CLOSE_NOWRITE.bits();
    }
}

impl EventMask {
    /// Bit reporting `kind`
    pub fn from_kind(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Access => EventMask::ACCESS,
            ChangeKind::Attrib => EventMask::ATTRIB,
            ChangeKind::CloseWrite => EventMask::CLOSE_WRITE,
            ChangeKind::CloseNoWrite => EventMask::CLOSE_NOWRITE,
            ChangeKind::Create => EventMask::CREATE,
            ChangeKind::Delete => EventMask::DELETE,
            ChangeKind::DeleteSelf => EventMask::DELETE_SELF,
            ChangeKind::Modify => EventMask::MODIFY,
            ChangeKind::MovedFrom => EventMask::MOVED_FROM,
            ChangeKind::MovedTo => EventMask::MOVED_TO,
            ChangeKind::MoveSelf => EventMask::MOVE_SELF,
            ChangeKind::Open => EventMask::OPEN,
        }
    }

    /// Mask to register for each target: open/close always, plus whatever
    /// else is configured to trigger
    pub fn watch_mask(trigger_on: &TriggerSet) -> Self {
        trigger_on
            .iter()
            .map(EventMask::from_kind)
            .fold(EventMask::OPEN | EventMask::CLOSE, |mask, bit| mask | bit)
    }
}

/// Opaque watch descriptor handed out by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(i32);

impl WatchHandle {
    pub fn from_raw(wd: i32) -> Self {
        Self(wd)
    }

    pub fn as_raw(self) -> i32 {
        self.0
    }
}

/// One decoded inotify record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub watch: WatchHandle,
    pub mask: EventMask,
}

impl Notification {
    /// Change kinds present in this record, in classification order
    pub fn kinds(&self) -> impl Iterator<Item = ChangeKind> + '_ {
        ChangeKind::ALL
            .into_iter()
            .filter(|kind| self.mask.contains(EventMask::from_kind(*kind)))
    }

    /// The originating watch is gone and must be re-registered
    pub fn is_invalidated(&self) -> bool {
        self.mask.contains(EventMask::IGNORED)
    }

    /// The kernel queue overflowed and events were dropped
    pub fn is_overflow(&self) -> bool {
        self.mask.contains(EventMask::Q_OVERFLOW)
    }

    /// Whether any kind in the record is configured to trigger
    pub fn triggers(&self, trigger_on: &TriggerSet) -> bool {
        self.kinds().any(|kind| trigger_on.contains(kind))
    }
}

/// Decode one record header
///
/// `bytes` must be exactly what a single read returned; anything but a full
/// header means the channel is broken.
pub fn decode(bytes: &[u8]) -> Result<Notification> {
    let header: &[u8; RECORD_SIZE] = bytes.try_into().map_err(|_| WatchError::ShortRead {
        got: bytes.len(),
        expected: RECORD_SIZE,
    })?;

    let field = |at: usize| [header[at], header[at + 1], header[at + 2], header[at + 3]];

    Ok(Notification {
        watch: WatchHandle(i32::from_ne_bytes(field(0))),
        mask: EventMask::from_bits_retain(u32::from_ne_bytes(field(4))),
    })
}
