//! End-to-end tests: drive the binary through stdin in a scratch directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run the binary in `dir` feeding `input`; returns (stdout, stderr, code).
fn run_cli(dir: &Path, input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_taskmaster"))
        .current_dir(dir)
        .env("TASKMASTER_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn taskmaster");

    // The process may exit before reading everything (e.g. on a load error).
    let _ = child.stdin.take().unwrap().write_all(input.as_bytes());
    let output = child.wait_with_output().expect("Failed to wait for taskmaster");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

#[test]
fn test_quit_from_empty_store() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), "x\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("[+] Create New Task / [=] Export / [x] Exit"));
    assert!(!dir.path().join("task.json").exists());
}

#[test]
fn test_session_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), "+\nWrite spec\n+\nDraft\nstop\nx\nexit\n");
    assert_eq!(code, 0);

    let raw = std::fs::read_to_string(dir.path().join("task.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let activity = &doc["tasks"][0]["activities"][0];
    assert_eq!(doc["tasks"][0]["summary"], "Write spec");
    assert_eq!(activity["summary"], "Draft");
    assert!(activity["end_time"].as_f64().unwrap() >= activity["start_time"].as_f64().unwrap());

    let (stdout, _, code) = run_cli(dir.path(), "0\nx\n=\nX\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("[0] Write spec"));
    assert!(stdout.contains("Current Task: Write spec"));
    assert!(stdout.contains("Export Complete!"));

    let report = std::fs::read_to_string(dir.path().join("task.md")).unwrap();
    assert!(report.starts_with("# Write spec\nTotal duration: "));
    assert!(report.contains("\n- Draft ("));
}

#[test]
fn test_malformed_document_aborts_startup() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("task.json"), "[1, 2").unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), "x\n");
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error: "), "stderr: {stderr}");
    assert!(stderr.contains("task.json"));
    assert!(!stdout.contains("Select Option"));
}

#[test]
fn test_config_relocates_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[storage]\ntasks_file = \"state.json\"\nreport_file = \"report.md\"\n",
    )
    .unwrap();

    let (_, _, code) = run_cli(dir.path(), "+\nT\nx\n=\nx\n");
    assert_eq!(code, 0);
    assert!(dir.path().join("state.json").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("report.md")).unwrap(),
        "# T\nTotal duration: 0 s"
    );
    assert!(!dir.path().join("task.json").exists());
}

#[test]
fn test_closed_stdin_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), "");
    assert_eq!(code, 0);
}
