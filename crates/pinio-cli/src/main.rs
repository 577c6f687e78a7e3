//! pinioctl - offline tooling for the pin I/O core
//!
//! Decodes captured board traffic into pin tables, replays discovery and
//! streamed telemetry through the pin manager, and validates configuration
//! files.

mod commands;
mod error;
mod hex;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pinio_core::PinIoConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "pinioctl")]
#[command(about = "Decode and replay pin I/O traffic captured from a Firmata-style board")]
#[command(version)]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Manager configuration (.json, .yaml or .yml) used by replay commands
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("pinioctl={log_level},pinio_core={log_level},pinio_protocol={log_level}")
                .into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidHex(_) | CliError::OddHexLength(_) | CliError::NoInput) => 2,
        Some(CliError::IoError(_)) => 3,
        Some(
            CliError::InvalidConfiguration(_)
            | CliError::UnsupportedConfigFormat(_)
            | CliError::JsonError(_),
        ) => 4,
        None => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

fn load_config(cli: &Cli) -> Result<PinIoConfig> {
    match &cli.config {
        Some(path) => Ok(commands::config::load_config(path)?),
        None => Ok(PinIoConfig::default()),
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Capabilities(input) => commands::decode::capabilities(input, cli.json),
        Commands::AnalogMap(input) => commands::decode::analog_map(input, cli.json),
        Commands::Discover {
            capabilities,
            mapping,
        } => commands::decode::discover(capabilities, mapping, &load_config(cli)?, cli.json),
        Commands::Telemetry(input) => {
            commands::decode::telemetry(input, &load_config(cli)?, cli.json)
        }
        Commands::DefaultLayout => commands::decode::default_layout_table(cli.json),
        Commands::CheckConfig { path } => commands::config::check_config(path, cli.json),
    }
}
