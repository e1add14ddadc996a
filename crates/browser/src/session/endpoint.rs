//! Remote-debugging endpoint discovery.
//!
//! Chromium exposes `/json/version` on its debug port; the reported
//! `webSocketDebuggerUrl` is the attach endpoint. Discovery is the
//! liveness probe for attach: a handle whose port no longer answers is
//! stale.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{BrowserError, Result};

/// Response from the `/json/version` discovery endpoint.
#[derive(Debug, Deserialize)]
pub struct VersionInfo {
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: String,
	#[serde(rename = "Browser")]
	pub browser: Option<String>,
}

/// Fetches the websocket endpoint from a debug port.
pub async fn fetch_version(port: &str) -> Result<VersionInfo> {
	let url = format!("http://127.0.0.1:{port}/json/version");

	let client = reqwest::Client::builder().timeout(Duration::from_secs(2)).build()?;

	let response = client.get(&url).send().await?;
	if !response.status().is_success() {
		return Err(BrowserError::Attach {
			port: port.to_string(),
			reason: format!("unexpected response from discovery endpoint: {}", response.status()),
		});
	}

	Ok(response.json().await?)
}
