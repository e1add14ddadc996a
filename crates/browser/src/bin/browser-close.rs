use clap::Parser;
use opkit_browser::commands::close::{self, CloseArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = CloseArgs::parse();

	if let Err(err) = close::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
