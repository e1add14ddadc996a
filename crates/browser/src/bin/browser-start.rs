use clap::Parser;
use opkit_browser::commands::start::{self, StartArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = StartArgs::parse();

	if let Err(err) = start::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
