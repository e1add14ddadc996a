//! Frontmatter/body parsing, quote extraction, and filename slugs.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{KbError, Result};

static FRONTMATTER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)^---\n(.*?)\n---\n(.*)$").unwrap());

static KEY_QUOTES_SECTION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)## Key Quotes\n\n(.*?)\n\n##").unwrap());

static QUOTE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(?m)^> "([^"]+)"\s*\n>\s*\n> — (.+)$"#).unwrap());

/// A pulled quote with its attribution line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
	pub text: String,
	pub attribution: String,
}

impl Quote {
	/// Renders the blockquote form used in synthesis documents.
	pub fn to_block(&self) -> String {
		format!("> \"{}\"\n>\n> — {}", self.text, self.attribution)
	}
}

/// Structured fields pulled out of an analysis document's frontmatter.
#[derive(Debug, Clone)]
pub struct Frontmatter {
	pub date: String,
	pub customer_first: String,
	pub customer_last: Option<String>,
	pub company: String,
	pub role: String,
	pub call_type: String,
	pub themes: Vec<String>,
	pub products: Vec<String>,
}

impl Frontmatter {
	/// Customer display name, `first last` when a last name is present.
	pub fn customer_name(&self) -> String {
		match &self.customer_last {
			Some(last) => format!("{} {}", self.customer_first, last),
			None => self.customer_first.clone(),
		}
	}
}

/// Splits a markdown document into (frontmatter, body). A document with
/// no frontmatter block yields an empty mapping and the full content.
pub fn split_frontmatter(content: &str) -> Result<(serde_yaml::Value, String)> {
	match FRONTMATTER_RE.captures(content) {
		Some(caps) => {
			let raw: serde_yaml::Value = serde_yaml::from_str(&caps[1])?;
			Ok((raw, caps[2].to_string()))
		}
		None => Ok((serde_yaml::Value::Mapping(Default::default()), content.to_string())),
	}
}

/// Validates the required fields and builds a [`Frontmatter`], reporting
/// every missing field at once.
pub fn parse_frontmatter(raw: &serde_yaml::Value) -> Result<Frontmatter> {
	const REQUIRED: [&str; 5] = ["date", "customer_first", "company", "role", "call_type"];

	let get_str = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(str::to_string);
	let get_list = |key: &str| -> Vec<String> {
		raw.get(key)
			.and_then(|v| v.as_sequence())
			.map(|seq| seq.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
			.unwrap_or_default()
	};

	let missing: Vec<String> =
		REQUIRED.iter().filter(|key| get_str(key).is_none()).map(|k| k.to_string()).collect();
	if !missing.is_empty() {
		return Err(KbError::MissingFrontmatter(missing));
	}

	Ok(Frontmatter {
		date: get_str("date").unwrap_or_default(),
		customer_first: get_str("customer_first").unwrap_or_default(),
		customer_last: get_str("customer_last"),
		company: get_str("company").unwrap_or_default(),
		role: get_str("role").unwrap_or_default(),
		call_type: get_str("call_type").unwrap_or_default(),
		themes: get_list("themes"),
		products: get_list("products"),
	})
}

/// Extracts the blockquotes from the `## Key Quotes` section.
pub fn extract_key_quotes(body: &str) -> Vec<Quote> {
	let Some(section) = KEY_QUOTES_SECTION_RE.captures(body) else {
		return Vec::new();
	};

	QUOTE_RE
		.captures_iter(&section[1])
		.map(|caps| Quote {
			text: caps[1].trim().to_string(),
			attribution: caps[2].trim().to_string(),
		})
		.collect()
}

/// Lowercased, hyphenated filename slug.
pub fn slugify(name: &str) -> String {
	static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\s]+").unwrap());
	static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());
	static COLLAPSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

	let lowered = name.to_lowercase();
	let hyphenated = SEPARATORS.replace_all(&lowered, "-");
	let cleaned = DISALLOWED.replace_all(&hyphenated, "");
	COLLAPSE.replace_all(&cleaned, "-").to_string()
}
