use thiserror::Error;

use opkit_core::Failure;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
	#[error("{}", .0.join("; "))]
	Validation(Vec<String>),

	#[error("authentication failed. Check your WISTIA_API_TOKEN in .env file")]
	AuthFailed,

	#[error("project not found. Check the project ID")]
	ProjectNotFound,

	#[error("file is too large. Check your Wistia account limits")]
	FileTooLarge,

	#[error("upload failed: {message}")]
	Api { status: u16, message: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl UploadError {
	/// HTTP status behind an API-level failure, when there is one.
	pub fn status(&self) -> Option<u16> {
		match self {
			UploadError::AuthFailed => Some(401),
			UploadError::ProjectNotFound => Some(404),
			UploadError::FileTooLarge => Some(413),
			UploadError::Api { status, .. } => Some(*status),
			UploadError::Http(err) => err.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	fn kind(&self) -> &'static str {
		match self {
			UploadError::Validation(_) => "INVALID_INPUT",
			UploadError::AuthFailed => "AUTH_FAILED",
			UploadError::ProjectNotFound => "PROJECT_NOT_FOUND",
			UploadError::FileTooLarge => "FILE_TOO_LARGE",
			UploadError::Api { .. } | UploadError::Http(_) => "UPLOAD_FAILED",
			UploadError::Io(_) => "IO_ERROR",
			UploadError::Json(_) => "UPLOAD_FAILED",
		}
	}

	fn suggestion(&self) -> String {
		match self {
			UploadError::Validation(_) => "Fix the listed parameters and retry".into(),
			UploadError::AuthFailed => {
				"Set WISTIA_API_TOKEN in the environment or a .env file".into()
			}
			UploadError::ProjectNotFound => "List projects in Wistia to find the right ID".into(),
			UploadError::FileTooLarge => "Compress the video or upgrade the account plan".into(),
			UploadError::Api { .. } | UploadError::Http(_) | UploadError::Json(_) => {
				"Retry; if it persists, check the Wistia status page".into()
			}
			UploadError::Io(_) => "Check the --file path and its permissions".into(),
		}
	}

	/// Writes this error's failure document to stderr.
	pub fn emit(&self) {
		Failure::new(self.kind(), self.to_string()).with_suggestion(self.suggestion()).emit();
	}
}
