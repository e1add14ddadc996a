//! Persisted session handle schema.

use serde::{Deserialize, Serialize};

/// On-disk record describing the one running browser process.
///
/// Serialized camelCase; `pid` drives close, `port`/`wsEndpoint` drive
/// attach, `startedAt` is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandle {
	/// OS process hosting the browser.
	pub pid: u32,
	/// WebSocket endpoint reported by the browser at launch.
	pub ws_endpoint: String,
	/// Remote-debugging port requested at start, kept as given.
	pub port: String,
	/// ISO-8601 creation timestamp.
	pub started_at: String,
}

impl SessionHandle {
	pub fn new(pid: u32, ws_endpoint: impl Into<String>, port: impl Into<String>) -> Self {
		Self {
			pid,
			ws_endpoint: ws_endpoint.into(),
			port: port.into(),
			started_at: chrono::Utc::now().to_rfc3339(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn handle_serializes_camel_case_fields() {
		let handle = SessionHandle::new(4242, "ws://127.0.0.1:9333/devtools/browser/abc", "9333");
		let value = serde_json::to_value(&handle).unwrap();

		assert_eq!(value["pid"], 4242);
		assert_eq!(value["port"], "9333");
		assert_eq!(value["wsEndpoint"], "ws://127.0.0.1:9333/devtools/browser/abc");
		assert!(value["startedAt"].as_str().unwrap().contains('T'));
	}

	#[test]
	fn handle_round_trips_through_json() {
		let handle = SessionHandle::new(1, "ws://127.0.0.1:9222/x", "9222");
		let json = serde_json::to_string(&handle).unwrap();
		let parsed: SessionHandle = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.pid, 1);
		assert_eq!(parsed.port, "9222");
	}
}
