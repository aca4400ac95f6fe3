//! Bareflow
//!
//! Interactive build helper for a React Native/Expo bare-workflow app:
//! prompts for platform, build mode, version bump, and cache cleaning,
//! then drives the native toolchains.

use bareflow_cli::output::Status;
use bareflow_core::config::Config;
use bareflow_core::error::exit_codes;
use bareflow_core::platform::{Mode, Platform};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

mod doctor;
mod flow;

#[derive(Parser)]
#[command(name = "bareflow")]
#[command(about = "Interactive build helper for React Native/Expo bare-workflow apps")]
#[command(version)]
#[derive(Debug)]
struct Cli {
    /// Target platform: android or ios (prompted when omitted)
    #[arg(value_parser = Platform::from_str)]
    platform: Option<Platform>,

    /// Build mode: debug or release (prompted when omitted)
    #[arg(short, long, value_parser = Mode::from_str)]
    mode: Option<Mode>,

    /// App manifest path (overrides the configured location)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Diagnose the build environment
    Doctor,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help and version go to stdout and are not failures
            let is_error = err.use_stderr();
            let _ = err.print();
            std::process::exit(if is_error {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            });
        }
    };

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let exit_code = match run(cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) if err.is_cancelled() => {
            println!();
            Status::cancelled("Operation cancelled by user.");
            exit_codes::CANCELLED
        }
        Err(err) => {
            Status::error(&err.to_string());
            exit_codes::FAILURE
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> bareflow_core::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Doctor) => doctor::run(&config),
        None => flow::run(flow::FlowOptions {
            platform: cli.platform,
            mode: cli.mode,
            manifest: cli.manifest,
            config,
        }),
    }
}
