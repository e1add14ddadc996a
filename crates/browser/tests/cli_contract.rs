//! Integration tests for the command binaries that do not need a live
//! browser: the close lifecycle against a fake home directory, and the
//! failure contract (stderr JSON + exit code 1).

use std::process::{Command, Output};

use tempfile::TempDir;

fn run_close(home: &TempDir, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_browser-close"))
		.args(args)
		.env("HOME", home.path())
		.env("USERPROFILE", home.path())
		.output()
		.expect("failed to run browser-close")
}

fn stdout_json(output: &Output) -> serde_json::Value {
	serde_json::from_slice(&output.stdout).expect("stdout is not a single JSON document")
}

fn stderr_json(output: &Output) -> serde_json::Value {
	serde_json::from_slice(&output.stderr).expect("stderr is not a single JSON document")
}

fn dead_pid() -> u32 {
	let mut child = Command::new("true").spawn().unwrap();
	let pid = child.id();
	child.wait().unwrap();
	pid
}

fn write_handle(home: &TempDir, pid: u32) {
	let handle = serde_json::json!({
		"pid": pid,
		"wsEndpoint": "ws://127.0.0.1:9333/devtools/browser/stale",
		"port": "9333",
		"startedAt": "2025-06-12T10:00:00+00:00",
	});
	std::fs::write(
		home.path().join(".browser-tools-pid"),
		serde_json::to_string_pretty(&handle).unwrap(),
	)
	.unwrap();
}

#[test]
fn close_without_session_is_a_no_op_success() {
	let home = TempDir::new().unwrap();

	let output = run_close(&home, &[]);

	assert!(output.status.success());
	let body = stdout_json(&output);
	assert_eq!(body["success"], true);
	assert_eq!(body["message"], "No browser running");
	assert!(output.stderr.is_empty(), "stderr should stay clean on success");
}

#[test]
fn close_twice_is_idempotent() {
	let home = TempDir::new().unwrap();
	write_handle(&home, dead_pid());

	let first = run_close(&home, &[]);
	assert!(first.status.success());
	assert_eq!(stdout_json(&first)["message"], "Browser closed successfully");
	assert!(!home.path().join(".browser-tools-pid").exists());

	let second = run_close(&home, &[]);
	assert!(second.status.success());
	assert_eq!(stdout_json(&second)["message"], "No browser running");
}

#[test]
fn force_close_on_exited_process_succeeds() {
	let home = TempDir::new().unwrap();
	write_handle(&home, dead_pid());

	let output = run_close(&home, &["--force"]);

	assert!(output.status.success());
	assert_eq!(stdout_json(&output)["success"], true);
	assert!(!home.path().join(".browser-tools-pid").exists());
}

#[test]
fn navigate_without_session_fails_with_contract_body() {
	let home = TempDir::new().unwrap();

	let output = Command::new(env!("CARGO_BIN_EXE_browser-navigate"))
		.arg("https://example.com")
		.env("HOME", home.path())
		.env("USERPROFILE", home.path())
		.output()
		.expect("failed to run browser-navigate");

	assert_eq!(output.status.code(), Some(1));
	let body = stderr_json(&output);
	assert_eq!(body["success"], false);
	assert_eq!(body["kind"], "NO_ACTIVE_SESSION");
	assert!(body["suggestion"].as_str().unwrap().contains("browser-start"));
}

#[test]
fn navigate_without_url_reports_usage() {
	let output = Command::new(env!("CARGO_BIN_EXE_browser-navigate"))
		.output()
		.expect("failed to run browser-navigate");

	assert_eq!(output.status.code(), Some(1));
	let body = stderr_json(&output);
	assert_eq!(body["kind"], "INVALID_INPUT");
	assert!(body["usage"].as_str().unwrap().starts_with("browser-navigate"));
}

#[test]
fn cookies_rejects_unknown_format_before_attaching() {
	let home = TempDir::new().unwrap();

	let output = Command::new(env!("CARGO_BIN_EXE_browser-cookies"))
		.arg("--format=csv")
		.env("HOME", home.path())
		.env("USERPROFILE", home.path())
		.output()
		.expect("failed to run browser-cookies");

	assert_eq!(output.status.code(), Some(1));
	let body = stderr_json(&output);
	assert_eq!(body["kind"], "INVALID_INPUT");
	assert!(body["error"].as_str().unwrap().contains("json, netscape, or header"));
}

#[test]
fn eval_without_code_reports_usage() {
	let output = Command::new(env!("CARGO_BIN_EXE_browser-eval"))
		.output()
		.expect("failed to run browser-eval");

	assert_eq!(output.status.code(), Some(1));
	let body = stderr_json(&output);
	assert_eq!(body["kind"], "INVALID_INPUT");
	assert!(body["usage"].as_str().unwrap().contains("browser-eval"));
}
