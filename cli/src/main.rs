//! Steady CLI - replays recorded notification traces through a
//! [`steady_core::StabilityGate`] and prints the resulting transcript.
//!
//! ```text
//! steady replay trace.toml [--config ~/.steady/config.toml]
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use steady::replay::{self, Script};
use steady_config::SteadyConfig;

#[derive(Parser)]
#[command(name = "steady")]
#[command(about = "Visual stability gate for notification lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a TOML trace and print one line per step
    Replay {
        /// Trace script to replay
        script: PathBuf,
        /// Config file (defaults to ~/.steady/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(configured: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    // stdout carries the transcript; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<SteadyConfig> {
    match explicit {
        Some(path) => SteadyConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SteadyConfig::load()
            .context("loading user config")?
            .unwrap_or_default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, config } => {
            let config = load_config(config.as_ref())?;
            init_tracing(config.log_filter());

            let signals = config.initial_signals();
            tracing::info!(?signals, script = %script.display(), "Replaying trace");

            let parsed = Script::load(&script)?;
            let transcript = replay::run(&parsed, signals)?;
            print!("{transcript}");
        }
    }

    Ok(())
}
