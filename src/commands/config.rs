//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from("herakles-fd-counter.yaml"),
    };

    let mut content = render_config(&config, format)?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# Herakles File Descriptor Counter Configuration
# ===============================================
#
# Logging
# -------
# log_level: "warn"            # off, error, warn, info, debug, trace
#
# External Tools
# --------------
# lsof_path: "lsof"            # lsof binary (PATH lookup if not absolute)
# ps_path: "ps"                # ps binary used for the /proc scan
# proc_root: "/proc"           # Root of the proc filesystem
# parallelism: null            # Parallel threads for the /proc scan (null = auto)
#
# Breakdown (-l)
# --------------
# listing_format: fixed        # fixed (lsof -n) or fields (lsof -n -F ct)
# group_by: process-type       # process or process-type
# include_names: null          # Include only commands matching these names
# exclude_names: null          # Exclude commands matching these names
# top_n: null                  # Show only the N largest rows
#
# System-wide Count (-a)
# ----------------------
# system_source: listing       # listing (lsof -n line count) or proc (/proc/<pid>/fd scan)
"#;

    format!("{comments}\n{yaml}")
}
