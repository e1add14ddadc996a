use clap::Parser;
use opkit_browser::commands::screenshot::{self, ScreenshotArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = ScreenshotArgs::parse();

	if let Err(err) = screenshot::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
