//! Configuration management for herakles-fd-counter.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use crate::listing::{GroupBy, ListingFormat};
use crate::process::SystemSource;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_LSOF_PATH: &str = "lsof";
pub const DEFAULT_PS_PATH: &str = "ps";
pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,

    // External tools
    #[serde(alias = "lsof-path")]
    pub lsof_path: Option<String>,
    #[serde(alias = "ps-path")]
    pub ps_path: Option<String>,
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    /// Parallel threads for the /proc scan (null/0 = auto)
    pub parallelism: Option<usize>,

    // Breakdown (-l)
    #[serde(alias = "listing-format")]
    pub listing_format: Option<ListingFormat>,
    #[serde(alias = "group-by")]
    pub group_by: Option<GroupBy>,
    #[serde(alias = "include-names")]
    pub include_names: Option<Vec<String>>,
    #[serde(alias = "exclude-names")]
    pub exclude_names: Option<Vec<String>>,
    #[serde(alias = "top-n")]
    pub top_n: Option<usize>,

    // System-wide count (-a)
    #[serde(alias = "system-source")]
    pub system_source: Option<SystemSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            lsof_path: Some(DEFAULT_LSOF_PATH.into()),
            ps_path: Some(DEFAULT_PS_PATH.into()),
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            parallelism: None,
            listing_format: Some(ListingFormat::Fixed),
            group_by: Some(GroupBy::ProcessType),
            include_names: None,
            exclude_names: None,
            top_n: None,
            system_source: Some(SystemSource::Listing),
        }
    }
}

impl Config {
    pub fn lsof(&self) -> &str {
        self.lsof_path.as_deref().unwrap_or(DEFAULT_LSOF_PATH)
    }

    pub fn ps(&self) -> &str {
        self.ps_path.as_deref().unwrap_or(DEFAULT_PS_PATH)
    }

    pub fn proc_root(&self) -> &Path {
        self.proc_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PROC_ROOT))
    }

    /// Effective log level; unknown names fall back to warn.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(|s| LogLevel::from_str(s, true).ok())
            .unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_str(level, true).is_err() {
            return Err(format!(
                "Invalid log_level '{}', expected off/error/warn/info/debug/trace",
                level
            )
            .into());
        }
    }

    if cfg.lsof().trim().is_empty() {
        return Err("lsof_path must not be empty".into());
    }
    if cfg.ps().trim().is_empty() {
        return Err("ps_path must not be empty".into());
    }

    if !cfg.proc_root().is_absolute() {
        return Err(format!(
            "proc_root must be an absolute path, got '{}'",
            cfg.proc_root().display()
        )
        .into());
    }

    if cfg.top_n == Some(0) {
        return Err("top_n must be greater than 0 when set".into());
    }

    Ok(())
}

/// Splits a comma-separated CLI list.
fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(level) = args.log_level {
        if let Some(value) = level.to_possible_value() {
            config.log_level = Some(value.get_name().to_string());
        }
    }

    if let Some(include_str) = &args.include_names {
        config.include_names = Some(split_names(include_str));
    }
    if let Some(exclude_str) = &args.exclude_names {
        config.exclude_names = Some(split_names(exclude_str));
    }

    if let Some(threads) = args.parallelism {
        config.parallelism = Some(threads);
    }
    if let Some(group_by) = args.group_by {
        config.group_by = Some(group_by);
    }
    if args.fields {
        config.listing_format = Some(ListingFormat::Fields);
    }
    if let Some(source) = args.source {
        config.system_source = Some(source);
    }
    if let Some(n) = args.top {
        config.top_n = Some(n);
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => {
            // Try default locations
            let defaults = [
                "/etc/herakles/fd-counter.yaml",
                "/etc/herakles/fd-counter.yml",
                "/etc/herakles/fd-counter.json",
                "./herakles-fd-counter.yaml",
                "./herakles-fd-counter.yml",
                "./herakles-fd-counter.json",
            ];

            match defaults.iter().map(Path::new).find(|p| p.exists()) {
                Some(p) => p.to_path_buf(),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Renders configuration in the requested format
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, format)?);
    Ok(())
}
