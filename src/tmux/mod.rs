//! tmux integration

mod interface;
mod keys;
mod screen;
mod session;

pub use interface::Multiplexer;
pub use keys::Key;
pub use screen::Screen;
pub use session::{Session, Shell};

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};

/// Prefix of the paste buffers used for captures; one buffer per window.
pub const BUFFER_PREFIX: &str = "tmux-harness-";

/// tmux command-line client bound to one server and host session.
#[derive(Debug, Clone)]
pub struct Tmux {
    binary: String,
    socket_name: Option<String>,
    session_name: String,
    width: u16,
    height: u16,
}

impl Tmux {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            binary: config.tmux.clone(),
            socket_name: config.socket_name.clone(),
            session_name: config.session_name.clone(),
            width: config.width,
            height: config.height,
        }
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// Exact-match target; a bare name would also match longer session names.
    fn session_target(&self) -> String {
        format!("={}", self.session_name)
    }

    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(socket) = &self.socket_name {
            cmd.args(["-L", socket]);
        }
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(args = ?args, "tmux");
        self.command().args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HarnessError::TmuxNotInstalled
            } else {
                HarnessError::Io(e)
            }
        })
    }

    /// Run a tmux command, returning trimmed stdout on success.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HarnessError::CommandFailed(format!(
                "tmux {}: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn has_session(&self) -> bool {
        self.output(&["has-session", "-t", &self.session_target()])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Create the detached host session if it is not running yet.
    pub fn ensure_session(&self) -> Result<()> {
        if self.has_session() {
            return Ok(());
        }

        let width = self.width.to_string();
        let height = self.height.to_string();
        self.run(&[
            "new-session",
            "-d",
            "-s",
            &self.session_name,
            "-x",
            &width,
            "-y",
            &height,
        ])?;
        debug!(session = %self.session_name, "created host session");
        Ok(())
    }

    pub fn kill_session(&self) -> Result<()> {
        self.run(&["kill-session", "-t", &self.session_target()])?;
        Ok(())
    }

    /// Kill the whole server, reclaiming windows leaked by earlier runs.
    pub fn kill_server(&self) -> Result<()> {
        let output = self.output(&["kill-server"])?;
        if !output.status.success() {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "kill-server reported failure"
            );
        }
        Ok(())
    }
}

impl Multiplexer for Tmux {
    fn new_window(&self, shell_command: &str) -> Result<String> {
        let target = format!("{}:", self.session_target());
        let id = self.run(&[
            "new-window",
            "-d",
            "-P",
            "-F",
            "#{window_id}",
            "-t",
            &target,
            shell_command,
        ])?;
        if id.is_empty() {
            return Err(HarnessError::CommandFailed(
                "tmux new-window returned no window id".to_string(),
            ));
        }
        Ok(id)
    }

    fn list_windows(&self) -> Result<Vec<String>> {
        let target = self.session_target();
        let out = self.run(&["list-windows", "-t", &target, "-F", "#{window_id}"])?;
        Ok(out.lines().map(str::to_string).collect())
    }

    fn send_keys(&self, window: &str, tokens: &[String]) -> Result<()> {
        let args = send_keys_args(window, tokens);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&args)?;
        Ok(())
    }

    fn capture_to(&self, window: &str, path: &Path) -> Result<bool> {
        let buffer = format!("{}{}", BUFFER_PREFIX, window.trim_start_matches('@'));
        let path = path.to_string_lossy();
        let output = self.output(&[
            "capture-pane",
            "-t",
            window,
            "-b",
            &buffer,
            ";",
            "save-buffer",
            "-b",
            &buffer,
            &path,
            ";",
            "delete-buffer",
            "-b",
            &buffer,
        ])?;
        Ok(output.status.success())
    }

    fn kill_window(&self, window: &str) -> Result<()> {
        self.run(&["kill-window", "-t", window])?;
        Ok(())
    }

    fn window_height(&self, window: &str) -> Result<usize> {
        let out = self.run(&["display-message", "-p", "-t", window, "#{pane_height}"])?;
        out.parse().map_err(|_| {
            HarnessError::CommandFailed(format!("unexpected pane height from tmux: {:?}", out))
        })
    }
}

/// Arguments for one `send-keys` call.
///
/// `--` stops tokens starting with `-` from being read as flags, and a
/// trailing `;` is escaped so tmux does not take it as a command separator.
fn send_keys_args(window: &str, tokens: &[String]) -> Vec<String> {
    let mut args = vec![
        "send-keys".to_string(),
        "-t".to_string(),
        window.to_string(),
        "--".to_string(),
    ];
    args.extend(tokens.iter().map(|token| match token.strip_suffix(';') {
        Some(head) => format!("{}\\;", head),
        None => token.clone(),
    }));
    args
}
