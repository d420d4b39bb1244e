use serial_test::serial;
use std::time::Duration;

use tmux_harness::{HarnessError, Key};

use crate::harness::{require_tmux, TestHarness};

#[test]
#[serial]
fn test_noop_command_then_close() {
    require_tmux!();

    let h = TestHarness::new("noop_close");
    h.type_line("true");
    h.wait_for_prompt(Duration::from_secs(5));

    h.close(Duration::from_secs(5));
    assert!(h.session().is_closed(), "window should be gone after close");
}

#[test]
#[serial]
fn test_typed_text_reaches_command_line() {
    require_tmux!();

    let h = TestHarness::new("typed_text");
    h.send_keys(["echo 12", "Left", "3", "Enter"]);

    let screen = h.until(Duration::from_secs(5), |s| {
        s.contains_line("132") && s.last() == "FIN"
    });
    assert!(screen.contains_line("FINecho 132"), "screen:\n{}", screen);
}

#[test]
#[serial]
fn test_special_text_tokens_are_literal() {
    require_tmux!();

    let h = TestHarness::new("special_text");
    h.send_keys([Key::text("-x"), Key::text(" a;"), Key::text(";"), Key::text(" b")]);
    h.until(Duration::from_secs(5), |s| s.last() == "FIN-x a;; b");

    h.send_keys([Key::Ctrl('u')]);
    h.type_line("echo one;");
    h.until(Duration::from_secs(5), |s| s.last() == "FIN");

    let screen = h.capture();
    assert!(screen.contains_line("FINecho one;"), "screen:\n{}", screen);
    assert!(screen.contains_line("one"), "screen:\n{}", screen);
}

#[test]
#[serial]
fn test_control_chords_edit_command_line() {
    require_tmux!();

    let h = TestHarness::new("chords");
    h.send_keys([
        Key::text("echo stale"),
        Key::Ctrl('u'),
        Key::text("echo fresh"),
        Key::Ctrl('a'),
        Key::Ctrl('k'),
        Key::text("echo cut"),
    ]);
    h.until(Duration::from_secs(5), |s| s.last() == "FINecho cut");

    h.send_keys([Key::Ctrl('y'), Key::Enter]);
    let screen = h.until(Duration::from_secs(5), |s| s.last() == "FIN");
    assert!(screen.contains_line("cutecho fresh"), "screen:\n{}", screen);
    assert!(!screen.any_line_contains("stale"));
}

#[test]
#[serial]
fn test_capture_is_bounded_and_trimmed() {
    require_tmux!();

    let h = TestHarness::new("capture_bounds");
    h.type_line("seq 1 200");
    let screen = h.until(Duration::from_secs(5), |s| s.from_end(2) == "200");

    assert!(screen.len() <= h.session().lines());
    assert!(!screen.last().trim().is_empty());
    assert_eq!(screen.last(), "FIN");
}

#[test]
#[serial]
fn test_until_timeout_reports_last_screen() {
    require_tmux!();

    let h = TestHarness::new("until_timeout");
    let err = h
        .session()
        .until(Duration::from_millis(300), |s| s.contains_line("never shown"))
        .unwrap_err();

    match &err {
        HarnessError::WaitExceeded { screen, .. } => assert_eq!(screen.last(), "FIN"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
#[serial]
fn test_kill_then_capture_fails() {
    require_tmux!();

    let h = TestHarness::new("kill");
    h.session().kill();

    assert!(h.session().is_closed());
    assert!(matches!(
        h.session().capture(),
        Err(HarnessError::WindowNotFound { .. })
    ));
    // Killing twice is harmless.
    h.session().kill();
}

#[test]
#[serial]
fn test_sessions_coexist() {
    require_tmux!();

    let a = TestHarness::new("coexist_a");
    let b = TestHarness::new("coexist_b");
    assert_ne!(a.session().window(), b.session().window());

    a.type_line("echo left");
    b.type_line("echo right");
    a.until(Duration::from_secs(5), |s| s.contains_line("left"));
    let screen = b.until(Duration::from_secs(5), |s| s.contains_line("right"));
    assert!(!screen.contains_line("left"));

    a.close(Duration::from_secs(5));
    assert!(!b.session().is_closed());
}
