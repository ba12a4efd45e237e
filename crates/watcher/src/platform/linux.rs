//! inotify notification channel

use crate::error::{Result, WatchError};
use crate::notification::{EventMask, WatchHandle, RECORD_SIZE};
use crate::table::Registrar;
use std::ffi::CString;
use std::fs::File;
use std::io::{self, Read};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::path::Path;

/// An inotify instance opened in non-blocking mode
///
/// Closing happens on drop, which also drops every watch registered on it.
#[derive(Debug)]
pub struct InotifyChannel {
    file: File,
}

impl InotifyChannel {
    pub fn open() -> Result<Self> {
        // SAFETY: plain syscall, no pointers involved
        let fd = unsafe { libc::inotify_init1(libc::IN_NONBLOCK | libc::IN_CLOEXEC) };
        if fd == -1 {
            return Err(WatchError::Init(io::Error::last_os_error()));
        }

        // SAFETY: `fd` was just returned by inotify_init1 and is owned by nobody else
        let file = unsafe { File::from_raw_fd(fd) };
        Ok(Self { file })
    }

    /// Read exactly one record header into `buf`
    ///
    /// Returns the number of bytes the kernel handed back, which the caller
    /// must check against `RECORD_SIZE`. `WouldBlock` means the queue is
    /// empty. A pending record that carries a name (only possible for
    /// directory targets) does not fit and fails with `InvalidInput`.
    pub fn read_raw(&self, buf: &mut [u8; RECORD_SIZE]) -> io::Result<usize> {
        loop {
            match (&self.file).read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

impl AsRawFd for InotifyChannel {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Registrar for InotifyChannel {
    fn add_watch(&self, path: &Path, mask: EventMask) -> io::Result<WatchHandle> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call
        let wd = unsafe { libc::inotify_add_watch(self.as_raw_fd(), c_path.as_ptr(), mask.bits()) };
        if wd == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(WatchHandle::from_raw(wd))
    }

    fn remove_watch(&self, handle: WatchHandle) -> io::Result<()> {
        // SAFETY: plain syscall, no pointers involved
        let ret = unsafe { libc::inotify_rm_watch(self.as_raw_fd(), handle.as_raw()) };
        if ret == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
