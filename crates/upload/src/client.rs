//! Upload request/response handling.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio_util::codec::{BytesCodec, FramedRead};
use tracing::debug;

use crate::error::{Result, UploadError};

const UPLOAD_URL: &str = "https://upload.wistia.com/";

/// Fallback account slug when `WISTIA_ACCOUNT` is unset.
const DEFAULT_ACCOUNT: &str = "yourname";

/// Request parameters for one upload.
pub struct UploadRequest<'a> {
	pub file: &'a Path,
	pub project: Option<&'a str>,
	pub name: Option<&'a str>,
	pub description: Option<&'a str>,
}

/// Media fields returned by the hosting API.
#[derive(Debug, Deserialize)]
pub struct WistiaMedia {
	pub hashed_id: String,
	pub name: Option<String>,
	pub duration: Option<f64>,
	pub created: Option<String>,
	pub thumbnail: Option<WistiaThumbnail>,
	pub project: Option<WistiaProject>,
}

#[derive(Debug, Deserialize)]
pub struct WistiaThumbnail {
	pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WistiaProject {
	pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WistiaApiError {
	error: Option<String>,
}

/// Success document printed to stdout.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
	pub success: bool,
	pub video_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub url: String,
	pub embed_url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbnail_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration: Option<f64>,
	pub transcript_url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub project_id: Option<i64>,
}

/// Shapes the media record into the operator-facing outcome, deriving the
/// account-scoped URLs.
pub fn shape_outcome(media: WistiaMedia, account: Option<&str>) -> UploadOutcome {
	let account = account.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_ACCOUNT);
	let account_host = format!("{account}.wistia.com");
	let id = media.hashed_id;

	UploadOutcome {
		success: true,
		url: format!("https://{account_host}/medias/{id}"),
		embed_url: format!("https://fast.wistia.net/embed/iframe/{id}"),
		transcript_url: format!("https://{account_host}/medias/{id}/captions"),
		thumbnail_url: media.thumbnail.and_then(|t| t.url),
		name: media.name,
		duration: media.duration,
		created: media.created,
		project_id: media.project.and_then(|p| p.id),
		video_id: id,
	}
}

/// Streams the video to the upload endpoint and returns the media record.
pub async fn upload(api_token: &str, request: &UploadRequest<'_>) -> Result<WistiaMedia> {
	let file_name = request
		.file
		.file_name()
		.map(|n| n.to_string_lossy().to_string())
		.unwrap_or_else(|| "upload".to_string());
	let size = tokio::fs::metadata(request.file).await?.len();

	let file = tokio::fs::File::open(request.file).await?;
	let stream = FramedRead::new(file, BytesCodec::new());
	let body = reqwest::Body::wrap_stream(stream);

	let mut form =
		Form::new().part("file", Part::stream_with_length(body, size).file_name(file_name));
	if let Some(project) = request.project {
		form = form.text("project_id", project.to_string());
	}
	if let Some(name) = request.name {
		form = form.text("name", name.to_string());
	}
	if let Some(description) = request.description {
		form = form.text("description", description.to_string());
	}

	debug!(size_bytes = size, "starting upload");
	let response = reqwest::Client::new()
		.post(UPLOAD_URL)
		.bearer_auth(api_token)
		.multipart(form)
		.send()
		.await?;

	let status = response.status();
	if !status.is_success() {
		return Err(match status.as_u16() {
			401 => UploadError::AuthFailed,
			404 => UploadError::ProjectNotFound,
			413 => UploadError::FileTooLarge,
			code => {
				let message = response
					.json::<WistiaApiError>()
					.await
					.ok()
					.and_then(|e| e.error)
					.unwrap_or_else(|| format!("unexpected response status {status}"));
				UploadError::Api { status: code, message }
			}
		});
	}

	Ok(response.json().await?)
}
