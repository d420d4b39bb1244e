//! `tmh cleanup` command implementation

use anyhow::Result;

use crate::config::HarnessConfig;
use crate::temp::TempChannel;
use crate::tmux::Tmux;

pub fn run(config: &HarnessConfig) -> Result<()> {
    let tmux = Tmux::from_config(config);

    // A dedicated socket means the whole server is ours; otherwise only the
    // host session is.
    match &config.socket_name {
        Some(socket) => {
            tmux.kill_server()?;
            println!("✓ Stopped tmux server '{}'", socket);
        }
        None => {
            if tmux.has_session() {
                tmux.kill_session()?;
                println!("✓ Killed session '{}'", tmux.session_name());
            } else {
                println!("No harness session '{}' running.", tmux.session_name());
            }
        }
    }

    TempChannel::new(&config.capture_path).discard();
    TempChannel::new(&config.output_path).discard();
    Ok(())
}
