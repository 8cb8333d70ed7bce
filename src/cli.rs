//! CLI arguments and subcommands for herakles-fd-counter.
//!
//! This module defines the command-line interface structure using the clap library.
//! Exactly one report mode runs per invocation: `-p`, then `-a`, then `-l`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::listing::GroupBy;
use crate::process::SystemSource;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug, Default)]
#[command(
    name = "herakles-fd-counter",
    about = "Count open file descriptors per process or system-wide",
    long_about = "Count open file descriptors per process or system-wide.\n\n\
                  Takes a single snapshot using lsof/ps listings and the /proc filesystem. \
                  Use -p for one process, -a for the whole system and -l for a breakdown \
                  table by process and descriptor type.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// pid for check file descriptors count
    #[arg(short = 'p', long = "pid")]
    pub pid: Option<u32>,

    /// check system file descriptors count
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// list file descriptors count for all process
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Breakdown grouping for -l
    #[arg(long, value_enum)]
    pub group_by: Option<GroupBy>,

    /// Use lsof field output (-F) for -l instead of the column layout
    #[arg(long)]
    pub fields: bool,

    /// Source for the system-wide count of -a
    #[arg(long, value_enum)]
    pub source: Option<SystemSource>,

    /// Show only the N largest rows of -l
    #[arg(long)]
    pub top: Option<usize>,

    /// Include only commands matching these names (comma-separated)
    #[arg(long)]
    pub include_names: Option<String>,

    /// Exclude commands matching these names (comma-separated)
    #[arg(long)]
    pub exclude_names: Option<String>,

    /// Parallel threads for the /proc scan (0 = auto)
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Log level (default: warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// The single report mode selected by the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pid(u32),
    All,
    List,
    Usage,
}

impl Args {
    /// Resolves flag precedence: pid, then all, then list. A pid of 0 counts as unset.
    pub fn mode(&self) -> Mode {
        match self.pid {
            Some(pid) if pid != 0 => Mode::Pid(pid),
            _ if self.all => Mode::All,
            _ if self.list => Mode::List,
            _ => Mode::Usage,
        }
    }
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that lsof, ps and /proc are usable
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },
}
