//! System-wide count (`-a`).

use std::time::Instant;
use tracing::debug;

use crate::command::CommandRunner;
use crate::config::Config;
use crate::process::count_system;

pub fn all_report(count: u64) -> String {
    format!("Opened file descriptors: {}", count)
}

/// Prints the system-wide open descriptor count.
pub fn command_all(runner: &dyn CommandRunner, cfg: &Config) {
    let start = Instant::now();
    let count = count_system(runner, cfg);
    debug!(
        "System-wide count from {:?} took {:.2}ms",
        cfg.system_source.unwrap_or_default(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("{}", all_report(count));
}
