use std::path::PathBuf;

use clap::Parser;

use opkit_kb::error::{KbError, Result};
use opkit_kb::updater;

#[derive(Debug, Parser)]
#[command(name = "update-syntheses")]
#[command(about = "Fold an interview analysis document into the knowledge base")]
struct Args {
	/// Interview analysis document to fold in
	#[arg(long, value_name = "PATH")]
	file: Option<PathBuf>,

	/// Knowledge-base root (defaults to the current directory)
	#[arg(long = "base-dir", value_name = "DIR")]
	base_dir: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
	let file = args.file.ok_or(KbError::MissingFileArgument)?;
	let base_dir = match args.base_dir {
		Some(dir) => dir,
		None => std::env::current_dir()?,
	};

	let outcome = updater::run(&file, &base_dir)?;
	opkit_core::emit_success(&outcome);
	Ok(())
}

fn main() {
	opkit_core::logging::init();
	let args = Args::parse();

	if let Err(err) = run(args) {
		err.emit();
		std::process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_and_base_dir_parse_in_equals_form() {
		let args =
			Args::parse_from(["update-syntheses", "--file=notes/dana.md", "--base-dir=/tmp/kb"]);
		assert_eq!(args.file, Some(PathBuf::from("notes/dana.md")));
		assert_eq!(args.base_dir, Some(PathBuf::from("/tmp/kb")));
	}

	#[test]
	fn missing_file_argument_is_an_input_failure() {
		let err = run(Args { file: None, base_dir: None }).unwrap_err();
		assert!(matches!(err, KbError::MissingFileArgument));
	}
}
