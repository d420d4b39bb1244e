//! Fixed-interval polling shared by the temp channel and session waits

use std::thread;
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Call `attempt` every `interval` until it yields a value or `timeout` elapses.
///
/// `Ok(Some(v))` stops polling with `v`, `Ok(None)` means "not yet" and `Err`
/// aborts immediately. Returns `Ok(None)` once the timeout is exhausted. The
/// first attempt always runs, even with a zero timeout.
pub fn poll<T, E, F>(timeout: Duration, interval: Duration, mut attempt: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    let started = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if let Some(value) = attempt()? {
            return Ok(Some(value));
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            tracing::trace!(attempts, ?elapsed, "poll exhausted");
            return Ok(None);
        }
        thread::sleep(interval.min(timeout - elapsed));
    }
}
