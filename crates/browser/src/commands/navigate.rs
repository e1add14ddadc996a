//! Navigate the session browser to a URL.

use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::error::{BrowserError, Result};
use crate::session::{BrowserConnection, SessionRepository};
use crate::styles::cli_styles;

const USAGE: &str = "browser-navigate <url> [--new-tab] [--wait-for=selector] [--timeout=ms]";

/// Poll step while waiting for a `--wait-for` selector to appear.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(name = "browser-navigate")]
#[command(about = "Navigate the running browser session to a URL")]
#[command(styles = cli_styles())]
pub struct NavigateArgs {
	/// Target URL
	pub url: Option<String>,

	/// Open the URL in a new tab instead of the current one
	#[arg(long = "new-tab")]
	pub new_tab: bool,

	/// Wait for a CSS selector to appear after navigation
	#[arg(long = "wait-for", value_name = "SELECTOR")]
	pub wait_for: Option<String>,

	/// Navigation/wait timeout in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 30_000)]
	pub timeout: u64,
}

#[derive(Debug, Serialize)]
struct NavigateResponse {
	success: bool,
	url: String,
	title: String,
	message: String,
}

pub async fn run(args: NavigateArgs) -> Result<()> {
	let Some(url) = args.url else {
		return Err(BrowserError::MissingArgument { message: "URL required".into(), usage: USAGE });
	};
	url::Url::parse(&url).map_err(|e| BrowserError::InvalidInput(format!("invalid URL {url}: {e}")))?;

	let repo = SessionRepository::open_default()?;
	let conn = BrowserConnection::attach_via(&repo).await?;

	let page = if args.new_tab { conn.new_page().await? } else { conn.target_or_new_page().await? };

	let timeout = Duration::from_millis(args.timeout);
	tokio::time::timeout(timeout, async {
		page.goto(url.as_str()).await?;
		page.wait_for_navigation().await?;
		Ok::<_, BrowserError>(())
	})
	.await
	.map_err(|_| BrowserError::Timeout { ms: args.timeout, condition: format!("navigation to {url}") })??;

	if let Some(selector) = &args.wait_for {
		wait_for_selector(&page, selector, timeout).await?;
	}

	let final_url = page.url().await?.unwrap_or_else(|| url.clone());
	let title = page.get_title().await?.unwrap_or_default();
	info!(url = %final_url, "navigation complete");

	opkit_core::emit_success(&NavigateResponse {
		success: true,
		url: final_url.clone(),
		title,
		message: format!("Navigated to {final_url}"),
	});

	conn.disconnect().await;
	Ok(())
}

/// Polls for `selector` until it matches or the budget elapses.
async fn wait_for_selector(
	page: &chromiumoxide::Page,
	selector: &str,
	budget: Duration,
) -> Result<()> {
	let deadline = tokio::time::Instant::now() + budget;
	loop {
		if page.find_element(selector).await.is_ok() {
			return Ok(());
		}
		if tokio::time::Instant::now() >= deadline {
			return Err(BrowserError::Timeout {
				ms: budget.as_millis() as u64,
				condition: format!("selector {selector}"),
			});
		}
		tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
	}
}
