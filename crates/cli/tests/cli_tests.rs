//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Cloud Cost Optimizer"),
        "Should show app name"
    );
    assert!(stdout.contains("suggestions"), "Should show suggestions command");
    assert!(stdout.contains("resources"), "Should show resources command");
    assert!(stdout.contains("history"), "Should show history command");
    assert!(stdout.contains("clear"), "Should show clear command");
    assert!(stdout.contains("status"), "Should show status command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("cco"), "Should show binary name");
}

/// Test suggestions subcommand help
#[test]
fn test_suggestions_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "suggestions", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Suggestions help should succeed");
    assert!(stdout.contains("--severity"), "Should show severity option");
    assert!(stdout.contains("--resource"), "Should show resource option");
}

/// Test resources subcommand help
#[test]
fn test_resources_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "resources", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Resources help should succeed");
    assert!(stdout.contains("[ID]"), "Should show optional id argument");
}
