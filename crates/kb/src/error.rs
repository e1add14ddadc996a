use std::path::PathBuf;

use thiserror::Error;

use opkit_core::Failure;

pub type Result<T> = std::result::Result<T, KbError>;

#[derive(Debug, Error)]
pub enum KbError {
	#[error("missing required parameter: --file")]
	MissingFileArgument,

	#[error("analysis file not found: {0}")]
	AnalysisNotFound(PathBuf),

	#[error("missing required frontmatter fields: {}", .0.join(", "))]
	MissingFrontmatter(Vec<String>),

	#[error("template not found: {0}")]
	TemplateNotFound(PathBuf),

	#[error("index not found: {0}")]
	IndexNotFound(PathBuf),

	#[error("invalid frontmatter: {0}")]
	Frontmatter(#[from] serde_yaml::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl KbError {
	fn kind(&self) -> &'static str {
		match self {
			KbError::MissingFileArgument => "INVALID_INPUT",
			KbError::AnalysisNotFound(_) => "FILE_NOT_FOUND",
			KbError::MissingFrontmatter(_) | KbError::Frontmatter(_) => "INVALID_FRONTMATTER",
			KbError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
			KbError::IndexNotFound(_) => "INDEX_NOT_FOUND",
			KbError::Io(_) | KbError::Json(_) => "IO_ERROR",
		}
	}

	fn suggestion(&self) -> String {
		match self {
			KbError::MissingFileArgument => {
				"Pass the analysis document with --file=<path>".into()
			}
			KbError::AnalysisNotFound(_) => "Check the --file path".into(),
			KbError::MissingFrontmatter(_) | KbError::Frontmatter(_) => {
				"Fill in the frontmatter block at the top of the analysis document".into()
			}
			KbError::TemplateNotFound(_) => {
				"Create syntheses/_SYNTHESIS_TEMPLATE.md under the base directory".into()
			}
			KbError::IndexNotFound(_) => "Create index.md under the base directory".into(),
			KbError::Io(_) | KbError::Json(_) => {
				"Check filesystem permissions under the base directory".into()
			}
		}
	}

	/// Writes this error's failure document to stderr.
	pub fn emit(&self) {
		Failure::new(self.kind(), self.to_string()).with_suggestion(self.suggestion()).emit();
	}
}
