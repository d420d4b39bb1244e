use serial_test::serial;
use std::fs;
use std::time::{Duration, Instant};

use tmux_harness::read_once;

use crate::harness::{require_tmux, TestHarness};

#[test]
fn test_unwritten_path_times_out_and_stays_absent() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("never");

    let started = Instant::now();
    let err = read_once(&path, Duration::from_secs_f64(0.3)).unwrap_err();
    let elapsed = started.elapsed();

    assert!(err.is_timeout());
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(700), "took {:?}", elapsed);
    assert!(!path.exists());
}

#[test]
fn test_written_content_is_returned_exactly_and_deleted() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("hello");
    fs::write(&path, "hello\n").unwrap();

    assert_eq!(read_once(&path, Duration::from_secs(5)).unwrap(), "hello\n");
    assert!(!path.exists());
}

#[test]
#[serial]
fn test_output_written_from_window() {
    require_tmux!();

    let h = TestHarness::new("window_output");
    let path = h.output_path().display().to_string();
    h.type_line(&format!("echo hello > {}", path));

    assert_eq!(h.read_output(), "hello\n");
    assert!(!h.output_path().exists());
}
