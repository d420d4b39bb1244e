use serial_test::serial;
use std::fs;

use crate::harness::{require_tmux, run_tmh, TestHarness};

#[test]
fn test_cli_read_once_prints_and_deletes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("result");
    fs::write(&path, "1391\n").unwrap();

    let output = run_tmh(dir.path(), &["read-once", path.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "tmh read-once failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1391\n");
    assert!(!path.exists());
}

#[test]
fn test_cli_read_once_times_out() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing");

    let output = run_tmh(
        dir.path(),
        &["read-once", path.to_str().unwrap(), "--timeout", "0.3"],
    );
    assert!(!output.status.success(), "read-once should fail on a missing file");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timed out"), "stderr: {}", stderr);
    assert!(!path.exists());
}

#[test]
#[serial]
fn test_cli_capture_runs_command() {
    require_tmux!();

    let dir = tempfile::TempDir::new().unwrap();
    let output = run_tmh(
        dir.path(),
        &["capture", "--run", "echo $((6 * 7))", "--wait-for", "42"],
    );
    assert!(
        output.status.success(),
        "tmh capture failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(": 42"), "stdout:\n{}", stdout);
}

#[test]
#[serial]
fn test_cli_windows_lists_open_window() {
    require_tmux!();

    let h = TestHarness::new("cli_windows");
    let output = h.run_cli(&["windows"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(h.session().window()),
        "window {} missing from:\n{}",
        h.session().window(),
        stdout
    );
}
