use clap::Parser;
use opkit_browser::commands::eval::{self, EvalArgs};

#[tokio::main]
async fn main() {
	opkit_core::logging::init();
	let args = EvalArgs::parse();

	if let Err(err) = eval::run(args).await {
		err.emit();
		std::process::exit(1);
	}
}
