//! X52 Pro Control Tool
//!
//! Sets LEDs, brightness and MFD text of connected X52 Pro joysticks.

mod command;
mod config;
mod runner;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use x52pro_hw::X52Pro;

use command::{Command, COMMANDS_HELP};
use config::Config;
use runner::Joysticks;

#[derive(Parser)]
#[command(name = "x52pro")]
#[command(about = "Control tool for the X52 Pro LEDs and MFD")]
#[command(version)]
#[command(after_help = COMMANDS_HELP)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Commands to execute in order (NAME=VALUE)
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.commands.is_empty() {
        if let Err(e) = Cli::command().print_long_help() {
            warn!("Failed to print help: {}", e);
        }
        return ExitCode::from(2);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    // Reject malformed commands before touching the bus
    let commands = cli
        .commands
        .iter()
        .map(|arg| arg.parse::<Command>())
        .collect::<Result<Vec<_>, _>>()?;

    let devices =
        X52Pro::get_all_with_timeout(config.timeout()).context("Failed to enumerate USB devices")?;
    let mut joysticks = Joysticks::new(devices, config.device)?;
    joysticks.run(&commands)?;

    Ok(())
}
