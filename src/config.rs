//! Harness configuration loaded from TOML

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarnessError, Result};

pub const CONFIG_ENV: &str = "TMUX_HARNESS_CONFIG";
const APP_DIR: &str = "tmux-harness";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// tmux executable
    pub tmux: String,
    /// Dedicated tmux server socket (`tmux -L`); `None` uses the default server
    pub socket_name: Option<String>,
    /// Detached host session that owns every harness window
    pub session_name: String,
    pub width: u16,
    pub height: u16,
    pub poll_interval_ms: u64,
    pub default_timeout_ms: u64,
    /// Bound on waiting for the capture file after each `capture-pane`
    pub read_timeout_ms: u64,
    pub capture_path: PathBuf,
    pub output_path: PathBuf,
    /// Shell prompt marker shown while no program is running
    pub prompt: String,
    /// Directory holding `.fzf.<shell>` rc files
    pub rcfile_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            tmux: "tmux".to_string(),
            socket_name: Some(APP_DIR.to_string()),
            session_name: APP_DIR.to_string(),
            width: 80,
            height: 24,
            poll_interval_ms: 100,
            default_timeout_ms: 1000,
            read_timeout_ms: 5000,
            capture_path: tmp.join("tmux-harness-capture.txt"),
            output_path: tmp.join("tmux-harness-output.txt"),
            prompt: "FIN".to_string(),
            rcfile_dir: dirs::home_dir(),
        }
    }
}

impl HarnessConfig {
    /// Resolve configuration: explicit path, then `$TMUX_HARNESS_CONFIG`, then
    /// the user config directory. Falls back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| HarnessError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}
