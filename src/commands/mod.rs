//! CLI command implementations for herakles-fd-counter.
//!
//! This module provides implementations for the report modes and subcommands:
//! - `pid`: Descriptor count of one process (`-p`)
//! - `all`: System-wide descriptor count (`-a`)
//! - `list`: Breakdown table per process and descriptor type (`-l`)
//! - `check`: System validation
//! - `config`: Configuration file generation

pub mod all;
pub mod check;
pub mod config;
pub mod list;
pub mod pid;

// Re-export command functions
pub use all::command_all;
pub use check::command_check;
pub use config::command_config;
pub use list::command_list;
pub use pid::command_pid;

/// Printed when no report mode is selected.
pub const USAGE_HINT: &str = "Invalid parameter. Use the ``-h'' option to get more help information.";
