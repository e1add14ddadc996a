//! Platform-conditional path resolution for the browser executable and
//! the real user profile directory.
//!
//! The lookup itself is a pure function of the platform and an existence
//! predicate, so the session lifecycle stays unit-testable without
//! touching the operating system.

use std::path::PathBuf;

/// Host platform, as far as browser path resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
	MacOs,
	Linux,
	Windows,
}

impl Platform {
	pub fn current() -> Self {
		if cfg!(target_os = "macos") {
			Platform::MacOs
		} else if cfg!(target_os = "windows") {
			Platform::Windows
		} else {
			Platform::Linux
		}
	}
}

/// Ordered candidate install paths per platform. First existing wins.
pub fn executable_candidates(platform: Platform) -> &'static [&'static str] {
	match platform {
		Platform::MacOs => &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"],
		Platform::Linux => &["/usr/bin/google-chrome", "/usr/bin/chromium", "/usr/bin/chromium-browser"],
		Platform::Windows => &[r"C:\Program Files\Google\Chrome\Application\chrome.exe"],
	}
}

/// Returns the first candidate accepted by `exists`, in candidate order.
pub fn resolve_executable(platform: Platform, exists: impl Fn(&str) -> bool) -> Option<String> {
	executable_candidates(platform).iter().copied().find(|c| exists(c)).map(str::to_string)
}

/// Locates the browser executable on the real filesystem, falling back to
/// a `PATH` lookup for the bare binary names.
pub fn locate_executable(platform: Platform) -> Option<String> {
	resolve_executable(platform, |candidate| std::path::Path::new(candidate).exists()).or_else(|| {
		let names: &[&str] = match platform {
			Platform::MacOs => &[],
			Platform::Linux => &["google-chrome", "chromium", "chromium-browser"],
			Platform::Windows => &["chrome.exe"],
		};
		names.iter().find_map(|name| {
			which::which(name).ok().map(|p| p.to_string_lossy().to_string())
		})
	})
}

/// Default profile directory of the real browser install.
pub fn profile_dir(platform: Platform) -> Option<PathBuf> {
	match platform {
		Platform::MacOs => {
			dirs::home_dir().map(|h| h.join("Library/Application Support/Google/Chrome/Default"))
		}
		Platform::Linux => dirs::config_dir().map(|c| c.join("google-chrome/Default")),
		Platform::Windows => dirs::data_local_dir().map(|d| d.join("Google/Chrome/User Data/Default")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_is_deterministic_per_platform() {
		for platform in [Platform::MacOs, Platform::Linux, Platform::Windows] {
			let first = executable_candidates(platform);
			let second = executable_candidates(platform);
			assert_eq!(first, second);
			assert!(!first.is_empty());
		}
	}

	#[test]
	fn resolve_returns_first_existing_candidate() {
		let resolved = resolve_executable(Platform::Linux, |c| c == "/usr/bin/chromium");
		assert_eq!(resolved.as_deref(), Some("/usr/bin/chromium"));
	}

	#[test]
	fn resolve_honors_candidate_order() {
		// Everything "exists": the first entry must win.
		let resolved = resolve_executable(Platform::Linux, |_| true);
		assert_eq!(resolved.as_deref(), Some("/usr/bin/google-chrome"));
	}

	#[test]
	fn resolve_fails_when_nothing_exists() {
		assert!(resolve_executable(Platform::MacOs, |_| false).is_none());
	}
}
