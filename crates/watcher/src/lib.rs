//! File watching and triggering for ontouch
//!
//! This crate provides:
//! - An inotify notification channel with typed record decoding
//! - The watch table and its reload protocol
//! - Debounced triggering of the configured command
//! - A periodic re-trigger
//! - The event loop tying them together

pub mod clock;
pub mod debounce;
pub mod error;
pub mod notification;
pub mod periodic;
pub mod platform;
pub mod session;
pub mod table;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{FireOutcome, Trigger};
pub use error::{Result, WatchError};
pub use notification::{EventMask, Notification, WatchHandle};
pub use session::Session;
pub use table::{Registrar, WatchTable};
