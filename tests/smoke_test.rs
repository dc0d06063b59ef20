/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

#[test]
fn binary_shows_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("pianotype"),
        "Help output should mention pianotype"
    );
}

#[test]
fn binary_shows_version() {
    let output = Command::new("cargo")
        .args(["run", "--", "--version"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn layout_prints_key_map() {
    let output = Command::new("cargo")
        .args(["run", "--", "layout"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "layout failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" 36  natural     A"));
    assert!(stdout.contains(" 94  accidental  ⤶"));
}

#[test]
fn oversized_layout_fails_cleanly() {
    let output = Command::new("cargo")
        .args(["run", "--", "layout", "--start", "0", "--end", "127"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(!output.status.success(), "Too many natural keys should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("only 36 symbols"));
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "nonexistent-command"])
        .output()
        .expect("Failed to execute cargo run");

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Should show helpful error, not a panic backtrace
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}
