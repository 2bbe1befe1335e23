//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the tracklet binary in the specified directory
pub fn run_tracklet_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tracklet"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tracklet binary")
}

/// Run the binary and assert it succeeded, returning stdout
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_tracklet_in_dir(dir, args);
    assert!(
        output.status.success(),
        "tracklet {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Add an issue through the CLI and return its ID
pub fn add_issue(dir: &Path, description: &str, severity: &str, assigned_to: &str) -> String {
    let stdout = run_ok(
        dir,
        &[
            "--json",
            "add",
            "--description",
            description,
            "--severity",
            severity,
            "--assigned-to",
            assigned_to,
        ],
    );
    let issue: serde_json::Value = serde_json::from_str(&stdout).expect("add should print JSON");
    issue["id"]
        .as_str()
        .expect("issue should have an id")
        .to_string()
}
