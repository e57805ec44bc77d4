//! Pricer CLI - European option pricing from the command line
//!
//! # Commands
//!
//! - `pricer price --model heston ...` - Price a single option
//! - `pricer grid --scenario <file>` - Price a maturity/strike grid
//! - `pricer compare --scenario <file> --mc <values.csv>` - Compare Monte Carlo
//!   estimates against Fourier reference prices
//! - `pricer check` - Show configuration and registered models
//!
//! # Configuration
//!
//! Settings are read from `pricer.toml` (or `--config`) and overridden by
//! `PRICER__<SECTION>__<KEY>` environment variables. `RUST_LOG` takes
//! precedence over the configured log level.

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod scenario;

pub use error::{CliError, Result};

use commands::compare::CompareArgs;
use commands::grid::GridArgs;
use commands::price::PriceArgs;
use crate::config::{CliConfig, LogLevel};

/// Closed-form and Fourier European option pricer
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single European option
    Price(PriceArgs),

    /// Price every point of a scenario grid
    Grid(GridArgs),

    /// Compare Monte Carlo estimates against Fourier prices
    Compare(CompareArgs),

    /// Check configuration and registered models
    Check,
}

fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn init_thread_pool(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| CliError::InvalidArgument(format!("thread pool: {}", e)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.general.log_level
    };
    init_tracing(level);
    init_thread_pool(config.general.threads)?;

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(path = %cli.config, ?config, "configuration loaded");

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Grid(args) => commands::grid::run(args, &config),
        Commands::Compare(args) => commands::compare::run(args, &config),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grid_with_global_flags() {
        let cli = Cli::try_parse_from([
            "pricer", "grid", "--scenario", "bates.toml", "--format", "json", "-v", "-c",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::Grid(args) => {
                assert_eq!(args.scenario, std::path::PathBuf::from("bates.toml"));
                assert_eq!(args.format, Some(crate::config::OutputFormat::Json));
            }
            _ => panic!("expected grid command"),
        }
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["pricer", "check"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.config, "pricer.toml");
        assert!(matches!(cli.command, Commands::Check));
    }
}
