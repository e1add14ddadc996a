use clap::Parser;
use opkit_browser::commands::navigate::{self, NavigateArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = NavigateArgs::parse();

	if let Err(err) = navigate::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
