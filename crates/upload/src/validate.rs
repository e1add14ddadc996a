//! Pre-flight validation of parameters and environment.

use std::path::{Path, PathBuf};

use crate::error::{Result, UploadError};

/// Container formats the hosting API accepts.
pub const SUPPORTED_FORMATS: [&str; 10] =
	[".mp4", ".mov", ".avi", ".wmv", ".flv", ".mkv", ".webm", ".ogv", ".mpg", ".mpeg"];

/// Returns whether `path` carries a supported video extension.
pub fn is_supported_format(path: &Path) -> bool {
	let Some(ext) = path.extension().map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
	else {
		return false;
	};
	SUPPORTED_FORMATS.contains(&ext.as_str())
}

/// Inputs that survived validation.
#[derive(Debug)]
pub struct Validated {
	pub file: PathBuf,
	pub api_token: String,
}

/// Collects every setup problem at once, so the operator fixes one run's
/// worth of issues rather than one per run.
pub fn check(file: Option<&Path>, api_token: Option<&str>) -> Result<Validated> {
	let mut errors = Vec::new();

	if api_token.is_none_or(str::is_empty) {
		errors.push("WISTIA_API_TOKEN not found in .env file".to_string());
	}

	match file {
		None => errors.push("--file parameter is required".to_string()),
		Some(path) if !path.exists() => {
			errors.push(format!("File not found: {}", path.display()));
		}
		Some(path) if !is_supported_format(path) => {
			let ext = path
				.extension()
				.map(|e| format!(".{}", e.to_string_lossy()))
				.unwrap_or_default();
			errors.push(format!(
				"Unsupported video format: {ext}. Supported formats: {}",
				SUPPORTED_FORMATS.join(", ")
			));
		}
		Some(_) => {}
	}

	match (file, api_token) {
		(Some(file), Some(token)) if errors.is_empty() => {
			Ok(Validated { file: file.to_path_buf(), api_token: token.to_string() })
		}
		_ => Err(UploadError::Validation(errors)),
	}
}
