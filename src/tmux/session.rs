//! One harness window: keystrokes in, screens out

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use super::{Key, Multiplexer, Screen, Tmux};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::launch::{shell_quote, LaunchCommand};
use crate::poll::poll;
use crate::temp::TempChannel;

/// Interactive shell started in each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    #[default]
    Bash,
    Zsh,
}

impl Shell {
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }

    /// Command that starts the shell with `prompt` as its only prompt text.
    ///
    /// Bash sources `<rcfile_dir>/.fzf.bash` when present and runs without rc
    /// files otherwise. Zsh always starts without rc files.
    pub fn launch_command(&self, prompt: &str, rcfile_dir: Option<&Path>) -> String {
        let prompt = shell_quote(prompt);
        match self {
            Shell::Bash => {
                let rcfile = rcfile_dir
                    .map(|dir| dir.join(".fzf.bash"))
                    .filter(|path| path.is_file());
                let rc_arg = match rcfile {
                    Some(path) => format!("--rcfile {}", shell_quote(&path.to_string_lossy())),
                    None => "--norc".to_string(),
                };
                format!("PS1={} PROMPT_COMMAND= bash {}", prompt, rc_arg)
            }
            Shell::Zsh => format!("PS1={} RPROMPT= zsh -f", prompt),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shell {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            other => Err(HarnessError::Config(format!("unsupported shell: {}", other))),
        }
    }
}

/// A multiplexer window running an interactive shell.
///
/// The window is created by the constructor and lives until [`Session::close`]
/// or [`Session::kill`]. Nothing is torn down on drop; owners decide.
pub struct Session<M: Multiplexer = Tmux> {
    mux: M,
    window: String,
    shell: Shell,
    lines: usize,
    prompt: String,
    capture: TempChannel,
    read_timeout: Duration,
    poll_interval: Duration,
    default_timeout: Duration,
}

impl Session {
    /// Open a window on the configured tmux server, creating its host session
    /// if needed.
    pub fn new(config: &HarnessConfig, shell: Shell) -> Result<Self> {
        let tmux = Tmux::from_config(config);
        tmux.ensure_session()?;
        Self::with_multiplexer(tmux, config, shell)
    }
}

impl<M: Multiplexer> Session<M> {
    pub fn with_multiplexer(mux: M, config: &HarnessConfig, shell: Shell) -> Result<Self> {
        let command = shell.launch_command(&config.prompt, config.rcfile_dir.as_deref());
        let window = mux.new_window(&command)?;

        // The line count is read once; later resizes are not tracked.
        let lines = match mux.window_height(&window) {
            Ok(lines) => lines,
            Err(e) => {
                let _ = mux.kill_window(&window);
                return Err(e);
            }
        };
        debug!(%window, %shell, lines, "opened session");

        Ok(Self {
            mux,
            window,
            shell,
            lines,
            prompt: config.prompt.clone(),
            capture: TempChannel::new(&config.capture_path)
                .with_poll_interval(config.poll_interval()),
            read_timeout: config.read_timeout(),
            poll_interval: config.poll_interval(),
            default_timeout: config.default_timeout(),
        })
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn multiplexer(&self) -> &M {
        &self.mux
    }

    /// True once the window no longer shows up in the live window list.
    ///
    /// A list command that tmux rejects means the host session or server is
    /// gone, so the window is too. Failing to run tmux at all says nothing
    /// about the window and counts as still open.
    pub fn is_closed(&self) -> bool {
        match self.mux.list_windows() {
            Ok(windows) => !windows.iter().any(|w| *w == self.window),
            Err(HarnessError::CommandFailed(e)) => {
                debug!(window = %self.window, error = %e, "host session gone");
                true
            }
            Err(e) => {
                debug!(window = %self.window, error = %e, "window list unavailable");
                false
            }
        }
    }

    /// Inject every key with one multiplexer call.
    pub fn send_keys<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let tokens: Vec<String> = keys.into_iter().map(|k| k.into().tmux_token()).collect();
        if tokens.is_empty() {
            return Ok(());
        }
        debug!(window = %self.window, keys = ?tokens, "send-keys");
        self.mux.send_keys(&self.window, &tokens)
    }

    /// Type `command` at the prompt and press Enter.
    pub fn launch(&self, command: &LaunchCommand) -> Result<()> {
        self.send_keys([Key::Text(command.render()), Key::Enter])
    }

    pub fn capture(&self) -> Result<Screen> {
        if !self.mux.capture_to(&self.window, self.capture.path())? {
            return Err(HarnessError::WindowNotFound {
                window: self.window.clone(),
            });
        }
        let raw = self.capture.read_once(self.read_timeout)?;
        Ok(Screen::from_capture(&raw, self.lines))
    }

    /// Capture until `predicate` accepts the screen, returning that screen.
    ///
    /// Gives up with [`HarnessError::WaitExceeded`] carrying the last screen
    /// once `timeout` has elapsed. Capture failures abort the wait.
    pub fn until<F>(&self, timeout: Duration, mut predicate: F) -> Result<Screen>
    where
        F: FnMut(&Screen) -> bool,
    {
        let mut last = Screen::default();
        let found = poll(timeout, self.poll_interval, || {
            let screen = self.capture()?;
            if predicate(&screen) {
                return Ok(Some(screen));
            }
            last = screen;
            Ok::<_, HarnessError>(None)
        })?;

        found.ok_or_else(|| HarnessError::WaitExceeded {
            condition: "screen condition".to_string(),
            timeout,
            screen: last,
        })
    }

    /// [`Session::until`] with the configured default timeout.
    pub fn wait_for<F>(&self, predicate: F) -> Result<Screen>
    where
        F: FnMut(&Screen) -> bool,
    {
        self.until(self.default_timeout, predicate)
    }

    /// Wait until the shell prompt is back on the bottom line.
    pub fn wait_for_prompt(&self, timeout: Duration) -> Result<Screen> {
        let prompt = self.prompt.clone();
        self.until(timeout, move |screen| screen.last().contains(&prompt))
    }

    /// Interrupt whatever runs, exit the shell and wait for the window to go.
    pub fn close(&self, timeout: Duration) -> Result<()> {
        let keys = [Key::Ctrl('c'), Key::Ctrl('u'), Key::text("exit"), Key::Enter];
        if let Err(e) = self.send_keys(keys) {
            if self.is_closed() {
                return Ok(());
            }
            return Err(e);
        }

        let closed = poll(timeout, self.poll_interval, || {
            Ok::<_, HarnessError>(self.is_closed().then_some(()))
        })?;
        if closed.is_some() {
            debug!(window = %self.window, "session closed");
            return Ok(());
        }

        Err(HarnessError::WaitExceeded {
            condition: format!("close of window {}", self.window),
            timeout,
            screen: self.capture().unwrap_or_default(),
        })
    }

    /// Destroy the window. Errors are ignored; it may already be gone.
    pub fn kill(&self) {
        if let Err(e) = self.mux.kill_window(&self.window) {
            debug!(window = %self.window, error = %e, "kill-window failed");
        }
    }
}
