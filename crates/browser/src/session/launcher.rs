//! Detached browser launch.
//!
//! The browser must outlive the start command, so it is spawned detached
//! (its own process group on Unix) rather than managed by the CDP client.
//! Readiness is the discovery endpoint answering on the requested port.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, info};

use super::endpoint;
use crate::error::{BrowserError, Result};

/// Launch parameters assembled by the start command.
pub struct LaunchSpec {
	pub port: u16,
	pub headless: bool,
	pub user_data_dir: Option<PathBuf>,
}

/// Outcome of a successful launch.
pub struct LaunchedBrowser {
	pub pid: u32,
	pub ws_endpoint: String,
}

/// Bounded readiness poll: the endpoint must answer within interval × attempts.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);
const READY_POLL_ATTEMPTS: u32 = 30;

/// Spawns the browser detached and waits for its debug endpoint.
pub async fn launch(executable: &str, spec: &LaunchSpec) -> Result<LaunchedBrowser> {
	let mut args = vec![
		format!("--remote-debugging-port={}", spec.port),
		"--no-first-run".to_string(),
		"--no-default-browser-check".to_string(),
	];
	if spec.headless {
		args.push("--headless=new".to_string());
	}
	if let Some(dir) = &spec.user_data_dir {
		args.push(format!("--user-data-dir={}", dir.display()));
	}

	let mut cmd = Command::new(executable);
	cmd.args(&args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

	// New process group so the browser survives this command's exit.
	#[cfg(unix)]
	std::os::unix::process::CommandExt::process_group(&mut cmd, 0);

	let child = cmd
		.spawn()
		.map_err(|e| BrowserError::Launch(format!("failed to launch {executable}: {e}")))?;
	let pid = child.id();
	debug!(pid, port = spec.port, "browser process spawned");

	let port = spec.port.to_string();
	for attempt in 0..READY_POLL_ATTEMPTS {
		tokio::time::sleep(READY_POLL_INTERVAL).await;
		match endpoint::fetch_version(&port).await {
			Ok(info) => {
				info!(pid, endpoint = %info.web_socket_debugger_url, "browser ready");
				return Ok(LaunchedBrowser { pid, ws_endpoint: info.web_socket_debugger_url });
			}
			Err(_) if attempt < READY_POLL_ATTEMPTS - 1 => continue,
			Err(_) => break,
		}
	}

	Err(BrowserError::Launch(format!(
		"browser started but the debugging endpoint never came up on port {}; \
		 the browser may already be running on another port",
		spec.port
	)))
}
