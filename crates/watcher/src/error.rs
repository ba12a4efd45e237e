//! Watcher errors
//!
//! Every variant is fatal: a broken notification channel or a partial watch
//! set is never retried. Messages leave the OS error to the source chain.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("inotify_init1")]
    Init(#[source] std::io::Error),

    #[error("inotify_add_watch {path}")]
    Register {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read: got {got} bytes, expected a {expected}-byte inotify record")]
    ShortRead { got: usize, expected: usize },

    #[error("read")]
    Read(#[source] std::io::Error),

    #[error("operator input")]
    Input(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;
