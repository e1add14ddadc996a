//! Evaluate JavaScript in the session browser's active page.

use std::io::Read;
use std::time::Duration;

use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use clap::Parser;
use serde::Serialize;

use crate::error::{BrowserError, Result};
use crate::session::{BrowserConnection, SessionRepository};
use crate::styles::cli_styles;

const USAGE: &str = "browser-eval <code|-> [--async] [--json] [--timeout=ms]";

#[derive(Debug, Parser)]
#[command(name = "browser-eval")]
#[command(about = "Evaluate JavaScript in the active page")]
#[command(styles = cli_styles())]
pub struct EvalArgs {
	/// JavaScript code, or `-` to read it from stdin
	pub code: Option<String>,

	/// Wrap the code in an async IIFE so `await` is usable
	#[arg(long = "async")]
	pub r#async: bool,

	/// Print the raw result value instead of the success envelope
	#[arg(long)]
	pub json: bool,

	/// Evaluation timeout in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 30_000)]
	pub timeout: u64,
}

#[derive(Debug, Serialize)]
struct EvalResponse {
	success: bool,
	result: serde_json::Value,
}

/// Wraps user code for `--async` so top-level `await` works.
fn wrap_async(code: &str) -> String {
	format!("(async () => {{ {code} }})()")
}

pub async fn run(args: EvalArgs) -> Result<()> {
	let code = match args.code.as_deref() {
		Some("-") => {
			let mut buffer = String::new();
			std::io::stdin().read_to_string(&mut buffer)?;
			buffer
		}
		Some(code) => code.to_string(),
		None => {
			return Err(BrowserError::MissingArgument {
				message: "JavaScript code required".into(),
				usage: USAGE,
			});
		}
	};
	if code.trim().is_empty() {
		return Err(BrowserError::MissingArgument {
			message: "JavaScript code required".into(),
			usage: USAGE,
		});
	}

	let repo = SessionRepository::open_default()?;
	let conn = BrowserConnection::attach_via(&repo).await?;
	let page = conn.target_page().await?;

	let exec_code = if args.r#async { wrap_async(&code) } else { code };

	let params = EvaluateParams::builder()
		.expression(exec_code)
		.return_by_value(true)
		.await_promise(true)
		.build()
		.map_err(BrowserError::InvalidInput)?;

	let evaluation = tokio::time::timeout(Duration::from_millis(args.timeout), page.evaluate(params))
		.await
		.map_err(|_| BrowserError::Timeout { ms: args.timeout, condition: "evaluation".into() })??;

	let result = evaluation.value().cloned().unwrap_or(serde_json::Value::Null);

	if args.json {
		opkit_core::emit_success(&result);
	} else {
		opkit_core::emit_success(&EvalResponse { success: true, result });
	}

	conn.disconnect().await;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_parse_with_positional_code() {
		let args = EvalArgs::parse_from(["browser-eval", "document.title", "--async", "--json"]);
		assert_eq!(args.code.as_deref(), Some("document.title"));
		assert!(args.r#async);
		assert!(args.json);
		assert_eq!(args.timeout, 30_000);
	}

	#[test]
	fn dash_is_accepted_as_stdin_marker() {
		let args = EvalArgs::parse_from(["browser-eval", "-"]);
		assert_eq!(args.code.as_deref(), Some("-"));
	}

	#[test]
	fn async_wrapping_produces_an_iife() {
		let wrapped = wrap_async("await fetch('/x'); return 1;");
		assert!(wrapped.starts_with("(async () => {"));
		assert!(wrapped.ends_with("})()"));
		assert!(wrapped.contains("await fetch('/x')"));
	}

	#[tokio::test]
	async fn missing_code_is_an_input_failure() {
		let err = run(EvalArgs { code: None, r#async: false, json: false, timeout: 1 })
			.await
			.unwrap_err();
		assert!(matches!(err, BrowserError::MissingArgument { .. }));
	}
}
