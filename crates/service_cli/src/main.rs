//! desk - command-line driver for the worst-of autocallable desk
//!
//! # Commands
//!
//! - `desk price` - Monte Carlo price with run diagnostics
//! - `desk greeks` - Per-asset bump-and-reprice delta and vega
//! - `desk hedge [--output file.csv]` - Delta-hedging simulation on one path
//! - `desk stress` - Reprice under the standard stress scenarios
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate loads a [`config::DeskConfig`]
//! and orchestrates the pricer and risk layers.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::DeskConfig;

/// Worst-of autocallable pricing and hedging desk
#[derive(Parser)]
#[command(name = "desk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "desk.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the note with Monte Carlo diagnostics
    Price {
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Per-asset delta and vega
    Greeks {
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Run the delta-hedging simulation
    Hedge {
        /// CSV file for the full hedge series
        #[arg(short, long)]
        output: Option<String>,

        /// Number of final steps to print
        #[arg(short, long, default_value = "5")]
        tail: usize,
    },

    /// Reprice under the standard stress scenarios
    Stress {
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = DeskConfig::load_with_env_and_validate(Path::new(&cli.config))?;

    // RUST_LOG wins; otherwise the configured level, or debug with --verbose
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price { format } => commands::price::run(&config, &format)?,
        Commands::Greeks { format } => commands::greeks::run(&config, &format)?,
        Commands::Hedge { output, tail } => commands::hedge::run(&config, output.as_deref(), tail)?,
        Commands::Stress { format } => commands::stress::run(&config, &format)?,
    }

    Ok(())
}
