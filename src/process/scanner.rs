//! Process scanning utilities for counting descriptor entries under /proc.
//!
//! This module provides functions to enumerate process ids, count the entries
//! of `/proc/<pid>/fd` and filter processes by command name.

use crate::command::CommandRunner;
use crate::config::Config;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Descriptor directory of a process.
pub fn fd_dir(proc_root: &Path, pid: u32) -> PathBuf {
    proc_root.join(pid.to_string()).join("fd")
}

/// Counts the entries of a process's descriptor directory.
pub fn count_descriptor_dir(proc_root: &Path, pid: u32) -> io::Result<u64> {
    let entries = fs::read_dir(fd_dir(proc_root, pid))?;
    Ok(entries.count() as u64)
}

/// Descriptor count of one process; an unreadable directory is reported and counts as 0.
pub fn count_by_directory(proc_root: &Path, pid: u32) -> u64 {
    match count_descriptor_dir(proc_root, pid) {
        Ok(count) => count,
        Err(e) => {
            error!("{}: {}", fd_dir(proc_root, pid).display(), e);
            0
        }
    }
}

/// Scans the proc root for numeric process directories.
pub fn collect_proc_pids(root: &Path, max: Option<usize>) -> Vec<u32> {
    let mut out = Vec::new();
    if let Ok(entries) = fs::read_dir(root) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(v) => v,
                None => continue,
            };
            if !name.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let pid: u32 = match name.parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            out.push(pid);
            if let Some(maxp) = max {
                if out.len() >= maxp {
                    break;
                }
            }
        }
    }
    out
}

/// Parses `ps axo pid` output. The header and non-numeric lines are skipped.
pub fn parse_pid_list(text: &str) -> Vec<u32> {
    text.lines()
        .skip(1)
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}

/// Sums the descriptor directories of every process listed by `ps`.
///
/// Processes that exit during the scan contribute 0, so the total is a
/// best-effort snapshot.
pub fn count_all_processes(runner: &dyn CommandRunner, cfg: &Config) -> u64 {
    let output = match runner.run(cfg.ps(), &["axo", "pid"]) {
        Ok(output) => output,
        Err(e) => {
            error!("{}", e);
            return 0;
        }
    };
    let pids = parse_pid_list(&output);
    debug!("Scanning descriptor directories of {} processes", pids.len());

    let root = cfg.proc_root();
    pids.par_iter()
        .map(|&pid| match count_descriptor_dir(root, pid) {
            Ok(count) => count,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Process {} exited before its descriptors were read", pid);
                0
            }
            Err(e) => {
                warn!("{}: {}", fd_dir(root, pid).display(), e);
                0
            }
        })
        .sum()
}

/// Determines if a command should be included based on configuration filters.
pub fn should_include_process(name: &str, cfg: &Config) -> bool {
    if let Some(ex) = &cfg.exclude_names {
        if ex.iter().any(|s| name.contains(s)) {
            return false;
        }
    }
    if let Some(inc) = &cfg.include_names {
        if !inc.is_empty() {
            return inc.iter().any(|s| name.contains(s));
        }
    }
    true
}
