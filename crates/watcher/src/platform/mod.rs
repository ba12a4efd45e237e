//! Platform-specific notification channels
//!
//! Only inotify is supported; the open/close event classes it reports have
//! no portable equivalent.

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::InotifyChannel;
