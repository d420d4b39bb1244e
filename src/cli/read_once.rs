//! `tmh read-once` command implementation

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::HarnessConfig;
use crate::temp::TempChannel;

#[derive(Args)]
pub struct ReadOnceArgs {
    /// File to read (defaults to the configured output path)
    path: Option<PathBuf>,

    /// Seconds to wait for non-empty content
    #[arg(long, default_value_t = 5.0)]
    timeout: f64,
}

pub fn run(config: &HarnessConfig, args: ReadOnceArgs) -> Result<()> {
    let timeout = super::parse_seconds(args.timeout)?;
    let path = args.path.unwrap_or_else(|| config.output_path.clone());

    let channel = TempChannel::new(path).with_poll_interval(config.poll_interval());
    let content = channel.read_once(timeout)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
