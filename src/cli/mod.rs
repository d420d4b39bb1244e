//! Command-line interface for `tmh`

pub mod capture;
pub mod cleanup;
pub mod read_once;
pub mod windows;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{HarnessConfig, CONFIG_ENV};

#[derive(Parser)]
#[command(name = "tmh", version, about = "Drive terminal programs inside tmux for testing")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Log tmux invocations and polling to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for a file to be written, print it and delete it
    ReadOnce(read_once::ReadOnceArgs),

    /// Open a harness window, optionally run a command, and print its screen
    Capture(capture::CaptureArgs),

    /// List live harness windows
    Windows,

    /// Remove harness windows left behind by earlier runs
    Cleanup,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = HarnessConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::ReadOnce(args) => read_once::run(&config, args),
        Commands::Capture(args) => capture::run(&config, args),
        Commands::Windows => windows::run(&config),
        Commands::Cleanup => cleanup::run(&config),
    }
}

pub(crate) fn parse_seconds(secs: f64) -> Result<std::time::Duration> {
    std::time::Duration::try_from_secs_f64(secs)
        .map_err(|_| anyhow::anyhow!("invalid timeout: {} seconds", secs))
}
