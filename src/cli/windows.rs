//! `tmh windows` command implementation

use anyhow::Result;

use crate::config::HarnessConfig;
use crate::tmux::{Multiplexer, Tmux};

pub fn run(config: &HarnessConfig) -> Result<()> {
    let tmux = Tmux::from_config(config);

    if !tmux.has_session() {
        println!("No harness session '{}' running.", tmux.session_name());
        return Ok(());
    }

    let windows = tmux.list_windows()?;
    println!("{} window(s) in '{}':", windows.len(), tmux.session_name());
    for window in windows {
        println!("  {}", window);
    }
    Ok(())
}
