//! Process signalling for the session lifecycle.
//!
//! A process that is already gone is treated as a successful no-op for
//! both termination calls; the close command relies on that.

use std::io;

#[cfg(unix)]
mod imp {
	use super::*;

	fn send(pid: u32, signal: libc::c_int) -> io::Result<()> {
		// SAFETY: kill(2) with a valid signal number; signal 0 only probes.
		let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
		if rc == 0 {
			return Ok(());
		}
		let err = io::Error::last_os_error();
		if err.raw_os_error() == Some(libc::ESRCH) {
			// No such process: already exited.
			return Ok(());
		}
		Err(err)
	}

	/// Requests graceful exit (SIGTERM).
	pub fn terminate(pid: u32) -> io::Result<()> {
		send(pid, libc::SIGTERM)
	}

	/// Non-negotiable kill (SIGKILL).
	pub fn kill(pid: u32) -> io::Result<()> {
		send(pid, libc::SIGKILL)
	}

	/// Probes process existence without delivering a signal.
	pub fn is_alive(pid: u32) -> bool {
		// SAFETY: signal 0 performs the existence/permission check only.
		unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
	}
}

#[cfg(windows)]
mod imp {
	use super::*;
	use std::process::Command;

	pub fn terminate(pid: u32) -> io::Result<()> {
		// No SIGTERM equivalent; taskkill without /F asks the process to close.
		// A non-zero status means the process is already gone, which close
		// treats as success anyway.
		let _ = Command::new("taskkill").args(["/PID", &pid.to_string()]).status()?;
		Ok(())
	}

	pub fn kill(pid: u32) -> io::Result<()> {
		let _ = Command::new("taskkill").args(["/F", "/PID", &pid.to_string()]).status()?;
		Ok(())
	}

	pub fn is_alive(pid: u32) -> bool {
		let filter = format!("PID eq {pid}");
		Command::new("tasklist")
			.args(["/FI", &filter, "/NH"])
			.output()
			.map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
			.unwrap_or(false)
	}
}

pub use imp::{is_alive, kill, terminate};
