//! Runtime requirement validation for herakles-fd-counter.
//!
//! Descriptor directories of other users' processes are only readable with
//! sufficient privileges, and every report mode depends on lsof or ps.

use nix::unistd::geteuid;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::command::CommandRunner;
use crate::process::fd_dir;

/// Check if running with sufficient privileges
pub fn check_user_privileges() -> bool {
    if !geteuid().is_root() {
        warn!("⚠️  Not running as root - descriptors of other users' processes are not visible");
        false
    } else {
        info!("✅ Running as root (uid=0)");
        true
    }
}

/// Check descriptor directory access for pid 1 under the proc root
pub fn check_proc_access(proc_root: &Path) -> Result<(), ValidationError> {
    let test_dir = fd_dir(proc_root, 1);

    match fs::read_dir(&test_dir) {
        Ok(_) => {
            info!("✅ {} readable", test_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(ValidationError::InsufficientPermissions(format!(
                "{}: {}",
                test_dir.display(),
                e
            )))
        }
        Err(e) => Err(ValidationError::ProcUnavailable(format!(
            "{}: {}",
            test_dir.display(),
            e
        ))),
    }
}

/// Check that a tool can be started. A non-zero exit still proves it exists.
pub fn check_tool(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Result<(), ValidationError> {
    match runner.run(program, args) {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_installed() => Err(ValidationError::ToolMissing(program.to_string())),
        Err(e) => {
            warn!("⚠️  {} is installed but returned an error: {}", program, e);
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    #[error("proc filesystem not available: {0}")]
    ProcUnavailable(String),

    #[error("{0} not found in PATH")]
    ToolMissing(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandError;

    struct Missing;

    impl CommandRunner for Missing {
        fn run(&self, program: &str, _args: &[&str]) -> Result<String, CommandError> {
            Err(CommandError::Spawn {
                program: program.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
        }
    }

    struct ExitsNonZero;

    impl CommandRunner for ExitsNonZero {
        fn run(&self, program: &str, _args: &[&str]) -> Result<String, CommandError> {
            Err(CommandError::Failed {
                program: program.to_string(),
                status: "exit status: 1".into(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_check_tool() {
        assert!(matches!(
            check_tool(&Missing, "lsof", &["-v"]),
            Err(ValidationError::ToolMissing(p)) if p == "lsof"
        ));
        assert!(check_tool(&ExitsNonZero, "lsof", &["-v"]).is_ok());
    }

    #[test]
    fn test_check_proc_access() {
        let root = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            check_proc_access(root.path()),
            Err(ValidationError::ProcUnavailable(_))
        ));

        fs::create_dir_all(fd_dir(root.path(), 1)).unwrap();
        assert!(check_proc_access(root.path()).is_ok());
    }
}
