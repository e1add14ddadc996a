//! Bounded wait-for-exit used by close.

use std::time::Duration;

use crate::process;

/// Backoff parameters for the exit poll: probe every `interval`, give up
/// after `ceiling` total.
#[derive(Debug, Clone, Copy)]
pub struct ExitPoll {
	pub interval: Duration,
	pub ceiling: Duration,
}

impl Default for ExitPoll {
	fn default() -> Self {
		Self { interval: Duration::from_millis(100), ceiling: Duration::from_secs(5) }
	}
}

impl ExitPoll {
	pub fn ceiling_ms(&self) -> u64 {
		self.ceiling.as_millis() as u64
	}
}

/// Waits for `pid` to exit, probing without effect at each interval.
/// Returns `true` once the process is gone, `false` when the ceiling
/// elapses first.
pub async fn wait_for_exit(pid: u32, poll: ExitPoll) -> bool {
	let deadline = tokio::time::Instant::now() + poll.ceiling;
	loop {
		if !process::is_alive(pid) {
			return true;
		}
		if tokio::time::Instant::now() >= deadline {
			return false;
		}
		tokio::time::sleep(poll.interval).await;
	}
}
