//! Start a remote-debuggable browser and persist its session handle.

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::platform::{self, Platform};
use crate::profile;
use crate::session::launcher::{self, LaunchSpec};
use crate::session::{SessionHandle, SessionRepository};
use crate::styles::cli_styles;

#[derive(Debug, Parser)]
#[command(name = "browser-start")]
#[command(about = "Start a browser with remote debugging enabled")]
#[command(styles = cli_styles())]
pub struct StartArgs {
	/// Reuse a copy of the real browser profile (saved logins)
	#[arg(long)]
	pub profile: bool,

	/// Run without a visible browser window
	#[arg(long)]
	pub headless: bool,

	/// Remote debugging port
	#[arg(long, value_name = "N", default_value_t = 9222)]
	pub port: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartResponse {
	success: bool,
	port: String,
	ws_endpoint: String,
	message: String,
}

pub async fn run(args: StartArgs) -> Result<()> {
	let repo = SessionRepository::open_default()?;
	let platform = Platform::current();

	let executable =
		platform::locate_executable(platform).ok_or(crate::error::BrowserError::NoExecutable)?;

	// A failed profile copy degrades to a plain session; it does not abort.
	let user_data_dir = if args.profile {
		match profile::materialize(platform) {
			Ok(dir) => Some(dir),
			Err(err) => {
				warn!(error = %err, "could not copy browser profile; continuing without it");
				None
			}
		}
	} else {
		None
	};

	let spec = LaunchSpec { port: args.port, headless: args.headless, user_data_dir };
	let launched = launcher::launch(&executable, &spec).await?;

	let handle = SessionHandle::new(launched.pid, launched.ws_endpoint.clone(), args.port.to_string());
	repo.save(&handle)?;
	info!(pid = handle.pid, port = %handle.port, "session handle written");

	opkit_core::emit_success(&StartResponse {
		success: true,
		port: handle.port.clone(),
		ws_endpoint: launched.ws_endpoint,
		message: format!("Browser started on port {}", handle.port),
	});
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn port_defaults_to_9222() {
		let args = StartArgs::parse_from(["browser-start"]);
		assert_eq!(args.port, 9222);
		assert!(!args.profile);
		assert!(!args.headless);
	}

	#[test]
	fn flags_parse_in_equals_form() {
		let args = StartArgs::parse_from(["browser-start", "--port=9333", "--headless", "--profile"]);
		assert_eq!(args.port, 9333);
		assert!(args.profile);
		assert!(args.headless);
	}

	#[test]
	fn start_response_matches_contract() {
		let response = StartResponse {
			success: true,
			port: "9333".into(),
			ws_endpoint: "ws://127.0.0.1:9333/devtools/browser/abc".into(),
			message: "Browser started on port 9333".into(),
		};
		let value = serde_json::to_value(&response).unwrap();
		assert_eq!(value["success"], true);
		assert_eq!(value["port"], "9333");
		assert_eq!(value["wsEndpoint"], "ws://127.0.0.1:9333/devtools/browser/abc");
	}
}
