//! Herakles File Descriptor Counter Library
//!
//! This library counts open file descriptors from a single snapshot of the
//! system. It parses the column-aligned output of `lsof`, aggregates the rows
//! per process and descriptor type, and counts `/proc/<pid>/fd` entries.
//!
//! # Usage
//!
//! ```rust
//! use herakles_fd_counter::listing::{aggregate_fixed_width, GroupBy};
//!
//! let listing = "\
//! COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF    NODE NAME
//! systemd     1 root  cwd    DIR  253,0     4096       2 /
//! systemd     1 root  rtd    DIR  253,0     4096       2 /
//! ";
//!
//! let rows = aggregate_fixed_width(listing, GroupBy::ProcessType).unwrap();
//! assert_eq!(rows[0].pid, "1");
//! assert_eq!(rows[0].count, 2);
//! ```

pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod listing;
pub mod process;
pub mod startup_checks;
pub mod table;

// Re-export main types for convenience
pub use command::{CommandError, CommandRunner, SystemRunner};
pub use config::Config;
pub use listing::{DescriptorRow, GroupBy, ReportRow};
