//! Structured output contract for all commands.
//!
//! A command emits exactly one JSON document per invocation:
//!
//! ```json
//! { "success": true, ... }
//! ```
//!
//! on stdout, or on failure a document on stderr plus exit code 1:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "Browser did not shut down gracefully",
//!   "kind": "SHUTDOWN_TIMEOUT",
//!   "suggestion": "Retry with --force to kill the browser process"
//! }
//! ```
//!
//! Other tooling parses these bodies; field names and the 0/1 exit code
//! convention are load-bearing.

use serde::Serialize;

/// Failure body shared by every command.
///
/// `kind` is the machine-readable error class; `error` and `suggestion`
/// are for humans reading the stderr stream.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
	pub success: bool,
	pub error: String,
	pub kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub suggestion: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub usage: Option<String>,
}

impl Failure {
	pub fn new(kind: &'static str, error: impl Into<String>) -> Self {
		Self { success: false, error: error.into(), kind, suggestion: None, usage: None }
	}

	pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
		self.suggestion = Some(suggestion.into());
		self
	}

	/// Attaches a usage line, for missing/invalid argument failures.
	pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
		self.usage = Some(usage.into());
		self
	}

	/// Writes the failure document to stderr. The caller owns the exit code.
	pub fn emit(&self) {
		if let Ok(json) = serde_json::to_string_pretty(self) {
			eprintln!("{json}");
		}
	}
}

/// Writes a success document to stdout.
pub fn emit_success<T: Serialize>(body: &T) {
	if let Ok(json) = serde_json::to_string_pretty(body) {
		println!("{json}");
	}
}
