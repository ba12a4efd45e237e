//! Common utilities for integration tests

pub mod cli;

// Re-export commonly used items
pub use cli::{append_to, count_lines, CommandResult, OntouchCommand, SETTLE};
