//! Check command implementation.
//!
//! Validates system requirements and configuration.

use crate::command::CommandRunner;
use crate::config::{validate_effective_config, Config};
use crate::process::{collect_proc_pids, count_descriptor_dir};
use crate::startup_checks::{check_proc_access, check_tool, check_user_privileges};

/// Validates system requirements and configuration.
pub fn command_check(
    runner: &dyn CommandRunner,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Herakles File Descriptor Counter - System Check");
    println!("==================================================");

    let mut all_ok = true;

    println!("\n🛠️  Checking external tools...");
    for (program, args) in [(config.lsof(), ["-v"]), (config.ps(), ["-V"])] {
        match check_tool(runner, program, &args) {
            Ok(()) => println!("   ✅ {} available", program),
            Err(e) => {
                println!("   ❌ {}", e);
                all_ok = false;
            }
        }
    }

    let proc_root = config.proc_root();
    println!("\n📁 Checking {} filesystem...", proc_root.display());
    let pids = collect_proc_pids(proc_root, Some(5));
    if pids.is_empty() {
        println!("   ❌ Cannot read any process entries from {}", proc_root.display());
        all_ok = false;
    } else {
        println!("   ✅ Can read {} process entries", pids.len());
    }

    match check_proc_access(proc_root) {
        Ok(()) => println!("   ✅ Descriptor directory of pid 1 readable"),
        Err(e) => println!("   ⚠️  {}", e),
    }

    let own_pid = std::process::id();
    match count_descriptor_dir(proc_root, own_pid) {
        Ok(count) => println!("   ✅ Own process holds {} descriptors", count),
        Err(e) => {
            println!("   ❌ Cannot count own descriptors: {}", e);
            all_ok = false;
        }
    }

    println!("\n👤 Checking privileges...");
    if check_user_privileges() {
        println!("   ✅ Running as root");
    } else {
        println!("   ⚠️  Not running as root - counts cover only accessible processes");
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => {
            println!("   ✅ Configuration is valid");
        }
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review warnings");
        std::process::exit(1);
    }
}
