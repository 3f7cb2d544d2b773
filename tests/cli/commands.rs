//! Running subcommands through the binary
//!
//! Each invocation gets its own in-process store, so these tests check
//! single-command behaviour and exit codes.

use super::{requeues, stderr, stdout};

#[test]
fn test_version_prints_build_line() {
    let output = requeues(&["version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("requeues "));
}

#[test]
fn test_push_prints_length() {
    let output = requeues(&[
        "--store-url",
        "memory://",
        "--queue",
        "a,b",
        "push",
        "egg",
        "bacon",
        "spam",
        "--block-size",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn test_dedup_push_reports_admitted() {
    let output = requeues(&[
        "-u", "memory://", "-q", "a", "--dedup", "push", "egg", "egg", "spam",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "admitted 2 length 2\n");
}

#[test]
fn test_pop_on_empty_queue_prints_nothing() {
    let output = requeues(&["-u", "memory://", "-q", "a", "pop"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_missing_queue_fails() {
    let output = requeues(&["-u", "memory://", "--no-color", "len"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No queue given"), "stderr: {}", stderr(&output));
}

#[test]
fn test_empty_dedup_element_fails() {
    let output = requeues(&["-u", "memory://", "-q", "a", "-d", "--no-color", "push", ""]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Elements must not be empty"));
}

#[test]
fn test_unreachable_store_fails() {
    let output = requeues(&["-u", "redis://127.0.0.1:1/", "-q", "a", "--no-color", "len"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("FATAL: Running len"), "stderr: {}", stderr(&output));
}

#[test]
fn test_json_log_format() {
    let output = requeues(&[
        "-u",
        "memory://",
        "-q",
        "a",
        "--log-format",
        "json",
        "--log-level",
        "info",
        "len",
    ]);

    assert!(output.status.success());
    let first_line = stderr(&output).lines().next().unwrap_or_default().to_string();
    let value: serde_json::Value = serde_json::from_str(&first_line).unwrap();
    assert_eq!(value["level"], "INF");
}
