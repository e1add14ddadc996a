//! Read cookies from the session browser.
//!
//! Three output shapes: JSON records, the tab-separated Netscape cookie
//! file convention (for curl/wget), and a `Cookie:` header value. The
//! formatters are pure over [`CookieRecord`] so they stay testable
//! without a browser.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::error::{BrowserError, Result};
use crate::session::{BrowserConnection, SessionRepository};
use crate::styles::cli_styles;

const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File";

#[derive(Debug, Parser)]
#[command(name = "browser-cookies")]
#[command(about = "Read cookies from the active page")]
#[command(styles = cli_styles())]
pub struct CookiesArgs {
	/// Only cookies whose domain contains this substring
	#[arg(long, value_name = "SUBSTR")]
	pub domain: Option<String>,

	/// Output format: json, netscape, or header
	#[arg(long, value_name = "FORMAT", default_value = "json")]
	pub format: String,

	/// Write the formatted output to a file instead of stdout
	#[arg(long, value_name = "PATH")]
	pub output: Option<PathBuf>,
}

/// The cookie fields the formatters care about.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
	pub name: String,
	pub value: String,
	pub domain: String,
	pub path: String,
	pub expires: f64,
	pub http_only: bool,
	pub secure: bool,
}

impl From<&chromiumoxide::cdp::browser_protocol::network::Cookie> for CookieRecord {
	fn from(c: &chromiumoxide::cdp::browser_protocol::network::Cookie) -> Self {
		Self {
			name: c.name.clone(),
			value: c.value.clone(),
			domain: c.domain.clone(),
			path: c.path.clone(),
			expires: c.expires,
			http_only: c.http_only,
			secure: c.secure,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CookieFormat {
	Json,
	Netscape,
	Header,
}

impl CookieFormat {
	/// Parsed manually (not a clap ValueEnum) so an unsupported value goes
	/// through the JSON failure contract instead of clap's usage error.
	fn parse(value: &str) -> Result<Self> {
		match value {
			"json" => Ok(CookieFormat::Json),
			"netscape" => Ok(CookieFormat::Netscape),
			"header" => Ok(CookieFormat::Header),
			other => Err(BrowserError::UnknownFormat(other.to_string())),
		}
	}
}

#[derive(Debug, Serialize)]
struct SavedReport {
	success: bool,
	path: PathBuf,
	count: usize,
	message: String,
}

/// One line per cookie, seven tab-separated fields, fixed header comment.
fn format_netscape(cookies: &[CookieRecord]) -> String {
	let mut out = String::from(NETSCAPE_HEADER);
	out.push('\n');
	for c in cookies {
		let http_only = if c.http_only { "TRUE" } else { "FALSE" };
		let secure = if c.secure { "TRUE" } else { "FALSE" };
		let expires = c.expires.max(0.0).floor() as i64;
		out.push_str(&format!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
			c.domain, http_only, c.path, secure, expires, c.name, c.value
		));
	}
	out
}

/// `name=value` pairs joined by `; `, original order preserved.
fn format_header(cookies: &[CookieRecord]) -> String {
	cookies.iter().map(|c| format!("{}={}", c.name, c.value)).collect::<Vec<_>>().join("; ")
}

fn format_cookies(cookies: &[CookieRecord], format: CookieFormat) -> Result<String> {
	match format {
		CookieFormat::Json => Ok(serde_json::to_string_pretty(cookies)?),
		CookieFormat::Netscape => Ok(format_netscape(cookies)),
		CookieFormat::Header => Ok(format_header(cookies)),
	}
}

pub async fn run(args: CookiesArgs) -> Result<()> {
	let format = CookieFormat::parse(&args.format)?;

	let repo = SessionRepository::open_default()?;
	let conn = BrowserConnection::attach_via(&repo).await?;
	let page = conn.target_page().await?;

	let mut cookies: Vec<CookieRecord> =
		page.get_cookies().await?.iter().map(CookieRecord::from).collect();

	if let Some(substr) = &args.domain {
		cookies.retain(|c| c.domain.contains(substr.as_str()));
	}

	let formatted = format_cookies(&cookies, format)?;

	match &args.output {
		Some(path) => {
			std::fs::write(path, &formatted)?;
			opkit_core::emit_success(&SavedReport {
				success: true,
				path: path.clone(),
				count: cookies.len(),
				message: format!("{} cookies saved to {}", cookies.len(), path.display()),
			});
		}
		None => println!("{formatted}"),
	}

	conn.disconnect().await;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_cookies() -> Vec<CookieRecord> {
		vec![
			CookieRecord {
				name: "sid".into(),
				value: "abc123".into(),
				domain: ".example.com".into(),
				path: "/".into(),
				expires: 1_900_000_000.7,
				http_only: true,
				secure: true,
			},
			CookieRecord {
				name: "theme".into(),
				value: "dark".into(),
				domain: "app.example.com".into(),
				path: "/settings".into(),
				expires: -1.0,
				http_only: false,
				secure: false,
			},
		]
	}

	#[test]
	fn netscape_output_has_header_and_seven_fields_per_line() {
		let out = format_netscape(&sample_cookies());
		let mut lines = out.lines();
		assert_eq!(lines.next(), Some(NETSCAPE_HEADER));

		let body: Vec<&str> = lines.collect();
		assert_eq!(body.len(), 2);
		for line in &body {
			assert_eq!(line.split('\t').count(), 7);
		}
		assert_eq!(body[0], ".example.com\tTRUE\t/\tTRUE\t1900000000\tsid\tabc123");
		// Sessions cookies report a negative expiry; floor to zero.
		assert_eq!(body[1], "app.example.com\tFALSE\t/settings\tFALSE\t0\ttheme\tdark");
	}

	#[test]
	fn header_output_joins_pairs_in_order() {
		assert_eq!(format_header(&sample_cookies()), "sid=abc123; theme=dark");
	}

	#[test]
	fn header_output_is_empty_for_no_cookies() {
		assert_eq!(format_header(&[]), "");
	}

	#[test]
	fn unknown_format_is_rejected() {
		let err = CookieFormat::parse("csv").unwrap_err();
		assert!(matches!(err, BrowserError::UnknownFormat(_)));
		assert!(err.to_string().contains("json, netscape, or header"));
	}

	#[test]
	fn json_format_serializes_records() {
		let out = format_cookies(&sample_cookies(), CookieFormat::Json).unwrap();
		let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
		assert_eq!(parsed[0]["name"], "sid");
		assert_eq!(parsed[0]["httpOnly"], true);
	}

	#[test]
	fn format_flag_defaults_to_json() {
		let args = CookiesArgs::parse_from(["browser-cookies"]);
		assert_eq!(args.format, "json");
	}
}
