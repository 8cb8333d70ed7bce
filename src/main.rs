//! herakles-fd-counter - version 0.1.0
//!
//! Snapshot counter for open file descriptors with tracing logging.
//! This is the main entry point that resolves configuration and runs exactly
//! one report mode or subcommand.

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use herakles_fd_counter::cli::{Args, Commands, LogLevel, Mode};
use herakles_fd_counter::commands::{
    command_all, command_check, command_config, command_list, command_pid, USAGE_HINT,
};
use herakles_fd_counter::config::{resolve_config, show_config, validate_effective_config, Config};
use herakles_fd_counter::SystemRunner;

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(config: &Config) {
    let level = config.log_level();
    let log_level = match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    info!("Logging initialized with level: {:?}", level);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    if args.check_config {
        match validate_effective_config(&config) {
            Ok(_) => {
                println!("✅ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.show_config {
        show_config(&config, args.config_format)?;
        return Ok(());
    }

    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }

    setup_logging(&config);

    // Configure parallel processing
    if let Some(threads) = config.parallelism {
        if threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .unwrap_or_else(|e| error!("Failed to set rayon thread pool: {}", e));
            debug!("Rayon thread pool configured with {} threads", threads);
        }
    }

    let runner = SystemRunner;
    let mode = args.mode();

    if let Some(command) = args.command {
        return match command {
            Commands::Check => command_check(&runner, &config),
            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output, format, commented),
        };
    }

    match mode {
        Mode::Pid(pid) => command_pid(&runner, &config, pid),
        Mode::All => command_all(&runner, &config),
        Mode::List => {
            if let Err(e) = command_list(&runner, &config) {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
        Mode::Usage => println!("{}", USAGE_HINT),
    }

    Ok(())
}
