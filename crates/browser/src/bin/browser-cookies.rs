use clap::Parser;
use opkit_browser::commands::cookies::{self, CookiesArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = CookiesArgs::parse();

	if let Err(err) = cookies::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
