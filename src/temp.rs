//! Read-once-and-delete handoff for files written by a driven program
//!
//! The program under test writes its result asynchronously; the only signal
//! that it is done is the file existing with non-empty content. Whatever the
//! outcome of a read, the file is removed afterwards so the next reader of the
//! same path never sees stale data.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{HarnessError, Result};
use crate::poll::{poll, POLL_INTERVAL};

const REMOVE_ATTEMPTS: u32 = 50;

/// A well-known file path the harness reads exactly once per write.
#[derive(Debug, Clone)]
pub struct TempChannel {
    path: PathBuf,
    poll_interval: Duration,
}

impl TempChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for non-empty content, return it, and delete the file.
    ///
    /// Missing files, read failures and empty files all count as "not ready".
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    /// Fails with [`HarnessError::Timeout`] once `max_wait` has elapsed. The
    /// file is removed on every return path.
    pub fn read_once(&self, max_wait: Duration) -> Result<String> {
        let _cleanup = RemoveOnDrop(&self.path);

        let content = poll(max_wait, self.poll_interval, || {
            Ok::<_, HarnessError>(try_read(&self.path))
        })?;

        match content {
            Some(content) => {
                debug!(path = %self.path.display(), bytes = content.len(), "read temp file");
                Ok(content)
            }
            None => Err(HarnessError::Timeout {
                path: self.path.clone(),
                waited: max_wait,
            }),
        }
    }

    /// Remove a leftover file so a fresh writer starts from a clean path.
    pub fn discard(&self) {
        remove_until_gone(&self.path);
    }
}

/// Free-standing form of [`TempChannel::read_once`] with the default poll interval.
pub fn read_once(path: impl AsRef<Path>, max_wait: Duration) -> Result<String> {
    TempChannel::new(path.as_ref()).read_once(max_wait)
}

fn try_read(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

struct RemoveOnDrop<'a>(&'a Path);

impl Drop for RemoveOnDrop<'_> {
    fn drop(&mut self) {
        remove_until_gone(self.0);
    }
}

fn remove_until_gone(path: &Path) {
    for _ in 0..REMOVE_ATTEMPTS {
        if !path.exists() {
            return;
        }
        let _ = fs::remove_file(path);
        if !path.exists() {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    warn!(path = %path.display(), "giving up removing temp file");
}
