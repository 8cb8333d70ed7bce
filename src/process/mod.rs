//! Process-related modules for descriptor counting.
//!
//! This module provides:
//! - `scanner`: /proc descriptor directory counting and process discovery
//! - `snapshot`: Counts derived from full lsof listings and source selection

pub mod scanner;
pub mod snapshot;

// Re-export commonly used types
pub use scanner::{
    collect_proc_pids, count_all_processes, count_by_directory, count_descriptor_dir, fd_dir,
    parse_pid_list, should_include_process,
};
pub use snapshot::{
    count_for_pid, count_listing_lines, count_pid_with_listing, count_system, count_system_wide,
    SystemSource,
};
