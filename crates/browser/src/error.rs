use thiserror::Error;

use opkit_core::Failure;

pub type Result<T> = std::result::Result<T, BrowserError>;

/// Machine-readable error classes surfaced in failure documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Handle file missing; no session is active.
	NoActiveSession,
	/// Handle present but the browser process is unreachable.
	AttachFailed,
	/// Session reachable but no open page and none requested.
	NoActivePage,
	/// No compatible executable located, or the spawn itself failed.
	LaunchFailed,
	/// Process did not exit within the bounded wait and force was not requested.
	ShutdownTimeout,
	/// Missing/invalid argument or unsupported format value.
	InvalidInput,
	/// Selector matched nothing.
	ElementNotFound,
	/// A bounded wait elapsed.
	Timeout,
	/// Filesystem error.
	IoError,
	/// Devtools transport error.
	CdpError,
	/// HTTP error against the discovery endpoint.
	HttpError,
}

impl ErrorKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ErrorKind::NoActiveSession => "NO_ACTIVE_SESSION",
			ErrorKind::AttachFailed => "ATTACH_FAILED",
			ErrorKind::NoActivePage => "NO_ACTIVE_PAGE",
			ErrorKind::LaunchFailed => "LAUNCH_FAILED",
			ErrorKind::ShutdownTimeout => "SHUTDOWN_TIMEOUT",
			ErrorKind::InvalidInput => "INVALID_INPUT",
			ErrorKind::ElementNotFound => "ELEMENT_NOT_FOUND",
			ErrorKind::Timeout => "TIMEOUT",
			ErrorKind::IoError => "IO_ERROR",
			ErrorKind::CdpError => "CDP_ERROR",
			ErrorKind::HttpError => "HTTP_ERROR",
		}
	}
}

#[derive(Debug, Error)]
pub enum BrowserError {
	#[error("no browser session is active")]
	NoSession,

	#[error("could not attach to browser on port {port}: {reason}")]
	Attach { port: String, reason: String },

	#[error("no active page found")]
	NoActivePage,

	#[error("could not find a compatible browser executable for this platform")]
	NoExecutable,

	#[error("browser launch failed: {0}")]
	Launch(String),

	#[error("browser did not shut down gracefully within {waited_ms}ms")]
	ShutdownTimeout { waited_ms: u64 },

	#[error("{message}")]
	MissingArgument { message: String, usage: &'static str },

	#[error("unknown format: {0}. Use: json, netscape, or header")]
	UnknownFormat(String),

	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Cdp(#[from] chromiumoxide::error::CdpError),

	#[error(transparent)]
	Http(#[from] reqwest::Error),
}

impl BrowserError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			BrowserError::NoSession => ErrorKind::NoActiveSession,
			BrowserError::Attach { .. } => ErrorKind::AttachFailed,
			BrowserError::NoActivePage => ErrorKind::NoActivePage,
			BrowserError::NoExecutable | BrowserError::Launch(_) => ErrorKind::LaunchFailed,
			BrowserError::ShutdownTimeout { .. } => ErrorKind::ShutdownTimeout,
			BrowserError::MissingArgument { .. }
			| BrowserError::UnknownFormat(_)
			| BrowserError::InvalidInput(_) => ErrorKind::InvalidInput,
			BrowserError::ElementNotFound { .. } => ErrorKind::ElementNotFound,
			BrowserError::Timeout { .. } => ErrorKind::Timeout,
			BrowserError::Io(_) | BrowserError::Json(_) => ErrorKind::IoError,
			BrowserError::Cdp(_) => ErrorKind::CdpError,
			BrowserError::Http(_) => ErrorKind::HttpError,
		}
	}

	/// Remedial hint accompanying every failure document.
	fn suggestion(&self) -> String {
		match self {
			BrowserError::NoSession => "Start a browser first with browser-start".into(),
			BrowserError::Attach { .. } => {
				"The session handle may be stale. Run browser-close, then browser-start again".into()
			}
			BrowserError::NoActivePage => "Navigate to a URL first with browser-navigate".into(),
			BrowserError::NoExecutable | BrowserError::Launch(_) => {
				"Check that Chrome is installed and the executable path is correct".into()
			}
			BrowserError::ShutdownTimeout { .. } => {
				"Retry with --force to kill the browser process".into()
			}
			BrowserError::MissingArgument { .. }
			| BrowserError::UnknownFormat(_)
			| BrowserError::InvalidInput(_) => "Check the command arguments".into(),
			BrowserError::ElementNotFound { .. } => {
				"Check that the page is loaded and the selector is correct".into()
			}
			BrowserError::Timeout { .. } => {
				"Increase --timeout or check that the page is responsive".into()
			}
			BrowserError::Io(_) | BrowserError::Json(_) => {
				"Check filesystem permissions and the session handle file".into()
			}
			BrowserError::Cdp(_) => {
				"The browser may have exited. Run browser-close, then browser-start again".into()
			}
			BrowserError::Http(_) => {
				"Check that the browser is still listening on its debug port".into()
			}
		}
	}

	/// Writes this error's failure document to stderr.
	pub fn emit(&self) {
		let mut failure =
			Failure::new(self.kind().as_str(), self.to_string()).with_suggestion(self.suggestion());
		if let BrowserError::MissingArgument { usage, .. } = self {
			failure = failure.with_usage(*usage);
		}
		failure.emit();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_variant_maps_to_a_kind_and_suggestion() {
		let errors = [
			BrowserError::NoSession,
			BrowserError::Attach { port: "9222".into(), reason: "refused".into() },
			BrowserError::NoActivePage,
			BrowserError::NoExecutable,
			BrowserError::Launch("spawn failed".into()),
			BrowserError::ShutdownTimeout { waited_ms: 5000 },
			BrowserError::UnknownFormat("csv".into()),
			BrowserError::ElementNotFound { selector: "#x".into() },
			BrowserError::Timeout { ms: 100, condition: "navigation".into() },
		];
		for err in errors {
			assert!(!err.kind().as_str().is_empty());
			assert!(!err.suggestion().is_empty());
		}
	}

	#[test]
	fn launch_class_covers_missing_executable() {
		assert_eq!(BrowserError::NoExecutable.kind(), ErrorKind::LaunchFailed);
		assert_eq!(BrowserError::Launch("x".into()).kind(), ErrorKind::LaunchFailed);
	}
}
