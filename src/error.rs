use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::tmux::Screen;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("tmux is not installed or not in PATH")]
    TmuxNotInstalled,

    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    #[error("window not found: {window}")]
    WindowNotFound { window: String },

    #[error("timed out after {waited:?} waiting for {}", .path.display())]
    Timeout { path: PathBuf, waited: Duration },

    #[error("{condition} not met within {timeout:?} ({} lines on screen)", .screen.len())]
    WaitExceeded {
        condition: String,
        timeout: Duration,
        screen: Screen,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Last screen observed before a wait gave up, if this error carries one.
    pub fn screen(&self) -> Option<&Screen> {
        match self {
            HarnessError::WaitExceeded { screen, .. } => Some(screen),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, HarnessError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
