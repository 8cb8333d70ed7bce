//! Per-process count (`-p`).

use crate::command::CommandRunner;
use crate::config::Config;
use crate::process::count_for_pid;

pub fn pid_report(pid: u32, count: u64) -> String {
    format!("Opened file descriptors for pid {}: {}", pid, count)
}

/// Prints the open descriptor count of one process.
pub fn command_pid(runner: &dyn CommandRunner, cfg: &Config, pid: u32) {
    let count = count_for_pid(runner, cfg, pid);
    println!("{}", pid_report(pid, count));
}
