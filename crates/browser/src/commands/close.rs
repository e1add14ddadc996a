//! Close the session browser and release its handle.
//!
//! Idempotent: an absent handle is a successful no-op, as is signalling a
//! process that already exited. The handle is only deleted once the
//! process is confirmed gone, so a refused graceful shutdown leaves the
//! handle in place for a `--force` retry.

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BrowserError, Result};
use crate::process;
use crate::profile;
use crate::session::SessionRepository;
use crate::session::shutdown::{self, ExitPoll};
use crate::styles::cli_styles;

#[derive(Debug, Parser)]
#[command(name = "browser-close")]
#[command(about = "Close the running browser session")]
#[command(styles = cli_styles())]
pub struct CloseArgs {
	/// Kill the browser if it does not shut down gracefully
	#[arg(long)]
	pub force: bool,
}

#[derive(Debug, Serialize)]
struct CloseResponse {
	success: bool,
	message: String,
}

pub async fn run(args: CloseArgs) -> Result<()> {
	let repo = SessionRepository::open_default()?;
	run_with(args, &repo, ExitPoll::default()).await
}

pub async fn run_with(args: CloseArgs, repo: &SessionRepository, poll: ExitPoll) -> Result<()> {
	let Some(handle) = repo.load()? else {
		opkit_core::emit_success(&CloseResponse {
			success: true,
			message: "No browser running".into(),
		});
		return Ok(());
	};

	let pid = handle.pid;
	process::terminate(pid)?;
	debug!(pid, "termination requested");

	let exited = shutdown::wait_for_exit(pid, poll).await;
	if !exited {
		if args.force {
			process::kill(pid)?;
			info!(pid, "browser force-killed");
		} else {
			// Handle stays in place so a --force retry can find the pid.
			return Err(BrowserError::ShutdownTimeout { waited_ms: poll.ceiling_ms() });
		}
	}

	repo.clear()?;
	profile::remove()?;

	opkit_core::emit_success(&CloseResponse {
		success: true,
		message: "Browser closed successfully".into(),
	});
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::SessionHandle;
	use std::time::Duration;
	use tempfile::tempdir;

	fn fast_poll() -> ExitPoll {
		ExitPoll { interval: Duration::from_millis(10), ceiling: Duration::from_millis(50) }
	}

	fn dead_pid() -> u32 {
		let mut child = std::process::Command::new("true").spawn().unwrap();
		let pid = child.id();
		child.wait().unwrap();
		pid
	}

	#[tokio::test]
	async fn close_without_handle_is_a_no_op_success() {
		let dir = tempdir().unwrap();
		let repo = SessionRepository::at(dir.path().join("handle.json"));

		run_with(CloseArgs { force: false }, &repo, fast_poll()).await.unwrap();
		assert!(repo.load().unwrap().is_none());
	}

	#[tokio::test]
	async fn close_removes_handle_for_an_already_dead_process() {
		let dir = tempdir().unwrap();
		let repo = SessionRepository::at(dir.path().join("handle.json"));
		repo.save(&SessionHandle::new(dead_pid(), "ws://127.0.0.1:9222/x", "9222")).unwrap();

		run_with(CloseArgs { force: false }, &repo, fast_poll()).await.unwrap();
		assert!(repo.load().unwrap().is_none());
	}

	#[tokio::test]
	async fn force_on_an_already_exited_process_is_not_an_error() {
		let dir = tempdir().unwrap();
		let repo = SessionRepository::at(dir.path().join("handle.json"));
		repo.save(&SessionHandle::new(dead_pid(), "ws://127.0.0.1:9222/x", "9222")).unwrap();

		run_with(CloseArgs { force: true }, &repo, fast_poll()).await.unwrap();
		assert!(repo.load().unwrap().is_none());
	}

	#[tokio::test]
	async fn closing_twice_is_idempotent() {
		let dir = tempdir().unwrap();
		let repo = SessionRepository::at(dir.path().join("handle.json"));
		repo.save(&SessionHandle::new(dead_pid(), "ws://127.0.0.1:9222/x", "9222")).unwrap();

		run_with(CloseArgs { force: false }, &repo, fast_poll()).await.unwrap();
		run_with(CloseArgs { force: false }, &repo, fast_poll()).await.unwrap();
	}
}
