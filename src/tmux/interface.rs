//! Capabilities a terminal multiplexer provides to a session

use std::path::Path;

use crate::error::Result;

/// The subset of a multiplexer a [`Session`](super::Session) drives.
///
/// Window identifiers are opaque strings handed out by `new_window`.
pub trait Multiplexer {
    /// Start a detached window running `shell_command` and return its id.
    fn new_window(&self, shell_command: &str) -> Result<String>;

    /// Ids of every live window.
    fn list_windows(&self) -> Result<Vec<String>>;

    /// Inject all `tokens` with a single call.
    fn send_keys(&self, window: &str, tokens: &[String]) -> Result<()>;

    /// Snapshot the visible pane of `window` into `path`.
    ///
    /// Returns whether the underlying command succeeded; `false` means the
    /// window is gone.
    fn capture_to(&self, window: &str, path: &Path) -> Result<bool>;

    fn kill_window(&self, window: &str) -> Result<()>;

    /// Number of visible lines in `window`.
    fn window_height(&self, window: &str) -> Result<usize>;
}
