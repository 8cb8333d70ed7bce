//! Snapshot descriptor counts derived from full `lsof` listings.

use crate::command::CommandRunner;
use crate::config::Config;
use crate::process::scanner::{count_all_processes, count_by_directory};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Where the system-wide count comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SystemSource {
    /// Line count of a full `lsof -n` listing
    #[default]
    Listing,
    /// Sum of /proc/<pid>/fd entries over every process listed by `ps`
    Proc,
}

/// Number of lines of a listing, excluding its header.
pub fn count_listing_lines(text: &str) -> u64 {
    text.lines().count().saturating_sub(1) as u64
}

/// Runs lsof and counts the listing; a failed run is reported and counts as 0.
fn count_lsof_listing(runner: &dyn CommandRunner, cfg: &Config, args: &[&str]) -> u64 {
    match runner.run(cfg.lsof(), args) {
        Ok(output) => count_listing_lines(&output),
        Err(e) => {
            error!("{}", e);
            0
        }
    }
}

/// System-wide count from an unfiltered `lsof -n` listing.
pub fn count_system_wide(runner: &dyn CommandRunner, cfg: &Config) -> u64 {
    count_lsof_listing(runner, cfg, &["-n"])
}

/// Count for one process from `lsof -n -p <pid>`.
pub fn count_pid_with_listing(runner: &dyn CommandRunner, cfg: &Config, pid: u32) -> u64 {
    let pid = pid.to_string();
    count_lsof_listing(runner, cfg, &["-n", "-p", &pid])
}

/// Count for one process using the platform's cheapest source.
///
/// macOS has no /proc, so the lsof listing is used there.
pub fn count_for_pid(runner: &dyn CommandRunner, cfg: &Config, pid: u32) -> u64 {
    if cfg!(target_os = "macos") {
        count_pid_with_listing(runner, cfg, pid)
    } else {
        count_by_directory(cfg.proc_root(), pid)
    }
}

/// System-wide count from the configured source.
pub fn count_system(runner: &dyn CommandRunner, cfg: &Config) -> u64 {
    match cfg.system_source.unwrap_or_default() {
        SystemSource::Listing => count_system_wide(runner, cfg),
        SystemSource::Proc => count_all_processes(runner, cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandError;
    use std::sync::Mutex;

    /// Records invocations and answers with canned output.
    #[derive(Default)]
    struct Recorder {
        output: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl CommandRunner for Recorder {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{} {}", program, args.join(" ")));
            self.output
                .map(str::to_string)
                .ok_or_else(|| CommandError::Failed {
                    program: program.to_string(),
                    status: "exit status: 1".into(),
                    stderr: String::new(),
                })
        }
    }

    #[test]
    fn test_count_listing_lines() {
        assert_eq!(count_listing_lines("H\na\nb\nc\nd\n"), 4);
        assert_eq!(count_listing_lines("H\na\nb\nc\nd"), 4);
        assert_eq!(count_listing_lines("H\n"), 0);
        assert_eq!(count_listing_lines(""), 0);
    }

    #[test]
    fn test_count_system_wide() {
        let runner = Recorder {
            output: Some("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\na\nb\nc\nd\n"),
            ..Recorder::default()
        };
        assert_eq!(count_system_wide(&runner, &Config::default()), 4);
        assert_eq!(runner.calls.lock().unwrap().as_slice(), ["lsof -n"]);
    }

    #[test]
    fn test_failed_listing_counts_zero() {
        let runner = Recorder::default();
        assert_eq!(count_system_wide(&runner, &Config::default()), 0);
        assert_eq!(count_pid_with_listing(&runner, &Config::default(), 7), 0);
    }

    #[test]
    fn test_count_pid_with_listing_args() {
        let runner = Recorder {
            output: Some("HEADER\nrow\nrow\n"),
            ..Recorder::default()
        };
        let cfg = Config {
            lsof_path: Some("/usr/sbin/lsof".into()),
            ..Config::default()
        };
        assert_eq!(count_pid_with_listing(&runner, &cfg, 321), 2);
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            ["/usr/sbin/lsof -n -p 321"]
        );
    }

    #[test]
    fn test_count_system_uses_configured_source() {
        let root = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("5/fd")).unwrap();
        std::fs::write(root.path().join("5/fd/0"), b"").unwrap();

        let runner = Recorder {
            output: Some("  PID\n    5\n"),
            ..Recorder::default()
        };
        let cfg = Config {
            proc_root: Some(root.path().to_path_buf()),
            system_source: Some(SystemSource::Proc),
            ..Config::default()
        };
        assert_eq!(count_system(&runner, &cfg), 1);
        assert_eq!(runner.calls.lock().unwrap().as_slice(), ["ps axo pid"]);
    }
}
