//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! commands that need no running backend are exercised here.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "examgrid-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("batch-move"));
    assert!(stdout.contains("swap"));
    assert!(stdout.contains("download"));
    assert!(stdout.contains("files"));
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("server_url"));
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("examgrid"));
}

#[test]
fn test_batch_move_rejects_bad_item_spec() {
    let (_, stderr, code) = run_cli(&[
        "batch-move",
        "--item",
        "not-an-item",
        "--day",
        "D1",
        "--shift",
        "1",
        "--yes",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("COURSE:GROUP"));
}
