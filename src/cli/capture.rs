//! `tmh capture` command implementation

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::config::HarnessConfig;
use crate::tmux::{Key, Screen, Session, Shell};

#[derive(Args)]
pub struct CaptureArgs {
    /// Shell started in the window (bash or zsh)
    #[arg(long, default_value = "bash")]
    shell: Shell,

    /// Command typed at the prompt before capturing
    #[arg(long)]
    run: Option<String>,

    /// Wait until some line contains this text
    #[arg(long)]
    wait_for: Option<String>,

    /// Seconds to wait for the prompt, the text and the window to close
    #[arg(long, default_value_t = 5.0)]
    timeout: f64,
}

pub fn run(config: &HarnessConfig, args: CaptureArgs) -> Result<()> {
    let timeout = super::parse_seconds(args.timeout)?;
    let session = Session::new(config, args.shell)?;

    let screen = match drive(&session, &args, timeout) {
        Ok(screen) => screen,
        Err(e) => {
            if let Some(screen) = e.screen() {
                eprintln!("{}", screen);
            }
            session.kill();
            return Err(e.into());
        }
    };
    println!("{}", screen);

    if let Err(e) = session.close(timeout) {
        session.kill();
        return Err(e.into());
    }
    Ok(())
}

fn drive(session: &Session, args: &CaptureArgs, timeout: Duration) -> crate::Result<Screen> {
    session.wait_for_prompt(timeout)?;

    if let Some(command) = &args.run {
        session.send_keys([Key::text(command.as_str()), Key::Enter])?;
    }

    match &args.wait_for {
        Some(text) => session.until(timeout, |screen| screen.any_line_contains(text)),
        None => session.capture(),
    }
}
