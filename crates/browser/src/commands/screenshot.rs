//! Capture a screenshot of the session browser's active page.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::ScreenshotParams;
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::error::{BrowserError, Result};
use crate::session::{BrowserConnection, SessionRepository};
use crate::styles::cli_styles;

/// Scrolls through the page in steps to trigger lazy-loaded content, then
/// resets to the top so the capture starts at the document origin.
const SCROLL_THROUGH_PAGE: &str = r#"(async () => {
	await new Promise((resolve) => {
		let totalHeight = 0;
		const distance = 100;
		const timer = setInterval(() => {
			const scrollHeight = document.body.scrollHeight;
			window.scrollBy(0, distance);
			totalHeight += distance;
			if (totalHeight >= scrollHeight) {
				clearInterval(timer);
				window.scrollTo(0, 0);
				resolve();
			}
		}, 100);
	});
})()"#;

/// Settle time after the scroll pass for late content.
const SETTLE_AFTER_SCROLL: Duration = Duration::from_secs(1);

const SCREENSHOT_DIR: &str = "screenshots";

#[derive(Debug, Parser)]
#[command(name = "browser-screenshot")]
#[command(about = "Capture a screenshot of the active page")]
#[command(styles = cli_styles())]
pub struct ScreenshotArgs {
	/// Output filename (placed in the screenshots directory)
	#[arg(long, value_name = "PATH")]
	pub output: Option<PathBuf>,

	/// Capture only the viewport instead of the full page
	#[arg(long)]
	pub viewport: bool,

	/// Capture only the first element matching a CSS selector
	#[arg(long, value_name = "SELECTOR")]
	pub element: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScreenshotResponse {
	success: bool,
	path: PathBuf,
	message: String,
}

/// Default filename: `screenshot-<UTC timestamp>.png`.
fn default_filename(now: chrono::DateTime<chrono::Utc>) -> PathBuf {
	PathBuf::from(format!("screenshot-{}.png", now.format("%Y-%m-%d-%H-%M-%S")))
}

pub async fn run(args: ScreenshotArgs) -> Result<()> {
	let repo = SessionRepository::open_default()?;
	let conn = BrowserConnection::attach_via(&repo).await?;
	let page = conn.target_page().await?;

	let full_page = !args.viewport;
	if full_page {
		let scroll = EvaluateParams::builder()
			.expression(SCROLL_THROUGH_PAGE)
			.await_promise(true)
			.build()
			.map_err(BrowserError::InvalidInput)?;
		page.evaluate(scroll).await?;
		tokio::time::sleep(SETTLE_AFTER_SCROLL).await;
	}

	let dir = std::env::current_dir()?.join(SCREENSHOT_DIR);
	std::fs::create_dir_all(&dir)?;
	let filename = args.output.unwrap_or_else(|| default_filename(chrono::Utc::now()));
	let filepath = dir.join(filename);

	if let Some(selector) = &args.element {
		let element = page.find_element(selector.as_str()).await.map_err(|_| {
			BrowserError::ElementNotFound { selector: selector.clone() }
		})?;
		let bytes = element.screenshot(CaptureScreenshotFormat::Png).await?;
		std::fs::write(&filepath, bytes)?;
	} else {
		let params = ScreenshotParams::builder()
			.format(CaptureScreenshotFormat::Png)
			.full_page(full_page)
			.build();
		page.save_screenshot(params, &filepath).await?;
	}
	info!(path = %filepath.display(), full_page, "screenshot captured");

	opkit_core::emit_success(&ScreenshotResponse {
		success: true,
		path: filepath.clone(),
		message: format!("Screenshot saved to {}", filepath.display()),
	});

	conn.disconnect().await;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn full_page_is_the_default() {
		let args = ScreenshotArgs::parse_from(["browser-screenshot"]);
		assert!(!args.viewport);
		assert!(args.output.is_none());
		assert!(args.element.is_none());
	}

	#[test]
	fn viewport_and_element_flags_parse() {
		let args = ScreenshotArgs::parse_from([
			"browser-screenshot",
			"--viewport",
			"--element=#hero",
			"--output=page.png",
		]);
		assert!(args.viewport);
		assert_eq!(args.element.as_deref(), Some("#hero"));
		assert_eq!(args.output, Some(PathBuf::from("page.png")));
	}

	#[test]
	fn default_filename_is_timestamped_png() {
		let now = chrono::Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
		assert_eq!(default_filename(now), PathBuf::from("screenshot-2025-03-14-09-26-53.png"));
	}

	#[test]
	fn scroll_script_resets_to_the_top() {
		assert!(SCROLL_THROUGH_PAGE.contains("window.scrollTo(0, 0)"));
	}
}
