//! Handle persistence.
//!
//! One storage location, three operations. The file's existence IS the
//! session state; there is no lock and no concurrent-writer protection,
//! so two racing starts can overwrite each other's handle. That matches
//! the historical behavior and is captured by tests rather than fixed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::handle::SessionHandle;
use crate::error::{BrowserError, Result};

const HANDLE_FILE: &str = ".browser-tools-pid";

/// Load/save/clear access to the single session handle.
pub struct SessionRepository {
	path: PathBuf,
}

impl SessionRepository {
	/// Repository over the fixed well-known location in the home directory.
	pub fn open_default() -> Result<Self> {
		let home = dirs::home_dir()
			.ok_or_else(|| BrowserError::Launch("could not determine home directory".into()))?;
		Ok(Self::at(home.join(HANDLE_FILE)))
	}

	/// Repository over an explicit path. Tests substitute a temp location.
	pub fn at(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the handle; absent file means no active session.
	pub fn load(&self) -> Result<Option<SessionHandle>> {
		let content = match fs::read_to_string(&self.path) {
			Ok(c) => c,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(BrowserError::Io(err)),
		};
		let handle: SessionHandle = serde_json::from_str(&content)?;
		Ok(Some(handle))
	}

	/// Writes the handle in a single write, overwriting any previous one.
	pub fn save(&self, handle: &SessionHandle) -> Result<()> {
		let content = serde_json::to_string_pretty(handle)?;
		fs::write(&self.path, content)?;
		debug!(path = %self.path.display(), pid = handle.pid, "session handle saved");
		Ok(())
	}

	/// Removes the handle; returns whether one existed.
	pub fn clear(&self) -> Result<bool> {
		match fs::remove_file(&self.path) {
			Ok(()) => {
				debug!(path = %self.path.display(), "session handle removed");
				Ok(true)
			}
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(BrowserError::Io(err)),
		}
	}
}
