use std::path::PathBuf;

use clap::Parser;

use opkit_upload::client::{self, UploadRequest};
use opkit_upload::error::Result;
use opkit_upload::validate;

#[derive(Debug, Parser)]
#[command(name = "wistia-upload")]
#[command(about = "Upload a video to Wistia")]
struct Args {
	/// Video file to upload
	#[arg(long, value_name = "PATH")]
	file: Option<PathBuf>,

	/// Target project ID
	#[arg(long, value_name = "ID")]
	project: Option<String>,

	/// Media name (defaults to the filename)
	#[arg(long, value_name = "NAME")]
	name: Option<String>,

	/// Media description
	#[arg(long, value_name = "TEXT")]
	description: Option<String>,
}

async fn run(args: Args) -> Result<()> {
	let api_token = std::env::var("WISTIA_API_TOKEN").ok();
	let validate::Validated { file, api_token } =
		validate::check(args.file.as_deref(), api_token.as_deref())?;

	let size = std::fs::metadata(&file)?.len();
	let size_mb = size as f64 / (1024.0 * 1024.0);
	let display_name =
		file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
	eprintln!("Uploading {display_name} ({size_mb:.2} MB) to Wistia...");

	let media = client::upload(
		&api_token,
		&UploadRequest {
			file: &file,
			project: args.project.as_deref(),
			name: args.name.as_deref(),
			description: args.description.as_deref(),
		},
	)
	.await?;

	let account = std::env::var("WISTIA_ACCOUNT").ok();
	opkit_core::emit_success(&client::shape_outcome(media, account.as_deref()));
	Ok(())
}

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	// Credentials live in a .env next to wherever the operator runs this.
	let _ = dotenvy::dotenv();
	let args = Args::parse();

	if let Err(err) = run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
