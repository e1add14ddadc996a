//! Transient working copy of the real browser profile.
//!
//! Start materializes the copy so the automated session can reuse saved
//! logins without mutating the real profile; close removes it. The copy
//! lives at a fixed path and is not tracked in the session handle.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BrowserError, Result};
use crate::platform::{self, Platform};

const TEMP_PROFILE_DIR: &str = ".browser-tools-temp-profile";

/// Fixed location of the transient profile copy.
pub fn temp_profile_path() -> Option<PathBuf> {
	dirs::home_dir().map(|h| h.join(TEMP_PROFILE_DIR))
}

/// Copies the platform default profile to the fixed temp location and
/// returns the copy's path.
pub fn materialize(platform: Platform) -> Result<PathBuf> {
	let source = platform::profile_dir(platform)
		.filter(|p| p.exists())
		.ok_or_else(|| BrowserError::Launch("could not determine browser profile path".into()))?;
	let dest = temp_profile_path()
		.ok_or_else(|| BrowserError::Launch("could not determine home directory".into()))?;

	fs::create_dir_all(&dest)?;
	copy_dir_recursive(&source, &dest)?;
	debug!(source = %source.display(), dest = %dest.display(), "profile copy materialized");
	Ok(dest)
}

/// Removes the transient profile copy if present.
pub fn remove() -> Result<()> {
	if let Some(dest) = temp_profile_path() {
		if dest.exists() {
			fs::remove_dir_all(&dest)?;
		}
	}
	Ok(())
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> std::io::Result<()> {
	for entry in fs::read_dir(source)? {
		let entry = entry?;
		let target = dest.join(entry.file_name());
		let file_type = entry.file_type()?;
		if file_type.is_dir() {
			fs::create_dir_all(&target)?;
			copy_dir_recursive(&entry.path(), &target)?;
		} else if file_type.is_file() {
			fs::copy(entry.path(), &target)?;
		}
		// Symlinks (e.g. SingletonLock) are skipped; the browser recreates them.
	}
	Ok(())
}
