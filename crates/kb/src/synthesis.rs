//! Synthesis document update/instantiation.
//!
//! A synthesis document accumulates quotes, source links, and a frequency
//! counter across interviews. Updating an existing document is regex
//! surgery on its named sections; a new document is instantiated from the
//! shared template by replacing its placeholders.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::markdown::Quote;

static REPRESENTATIVE_QUOTES_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)(## Representative Quotes\n\n)(.*?)(\n\n##)").unwrap());

static SOURCE_INTERVIEWS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)(## Source Interviews\n\n)(.*)$").unwrap());

static LAST_UPDATED_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\*\*Last Updated\*\*: \d{4}-\d{2}-\d{2}").unwrap());

static FREQUENCY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"This theme appears in (\d+) interviews?").unwrap());

const TITLE_PLACEHOLDER: &str = "# [Theme/Product/Persona Name]";
const DESCRIPTION_PLACEHOLDER: &str =
	"Brief description of this theme/product/persona and why it matters.";
const QUOTE_PLACEHOLDER: &str = "> \"Example quote from an interview that exemplifies this theme/pain point/pattern.\"\n>\n> — Attribution";
const SOURCE_PLACEHOLDER: &str =
	"- [YYYY-MM-DD Interview Title](../interview-analysis/filename.md)";
const FREQUENCY_PLACEHOLDER: &str = "This theme appears in X interviews";
const LAST_UPDATED_PLACEHOLDER: &str = "**Last Updated**: YYYY-MM-DD";

/// What one interview contributes to one synthesis document.
pub struct SynthesisUpdate<'a> {
	pub title: String,
	pub description: String,
	pub quotes: &'a [Quote],
	pub source_link: &'a str,
	/// Bump the frequency counter (updates only; new documents start at 1).
	pub increment_frequency: bool,
}

/// Applies `update` to the document at `path`, instantiating it from
/// `template` when absent.
pub fn apply(path: &Path, template: &str, update: &SynthesisUpdate<'_>, today: &str) -> Result<()> {
	let content = if path.exists() {
		update_existing(&fs::read_to_string(path)?, update, today)
	} else {
		instantiate(template, update, today)
	};
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, content)?;
	Ok(())
}

fn update_existing(content: &str, update: &SynthesisUpdate<'_>, today: &str) -> String {
	let mut content = content.to_string();

	if !update.quotes.is_empty() {
		if let Some(caps) = REPRESENTATIVE_QUOTES_RE.captures(&content) {
			let new_quotes =
				update.quotes.iter().map(Quote::to_block).collect::<Vec<_>>().join("\n\n");
			let replacement = format!("{}{}\n\n{}{}", &caps[1], &caps[2], new_quotes, &caps[3]);
			content = content.replacen(&caps[0], &replacement, 1);
		}
	}

	if let Some(caps) = SOURCE_INTERVIEWS_RE.captures(&content) {
		// Each interview is listed once, no matter how often it is folded in.
		if !caps[2].contains(update.source_link) {
			let replacement = format!("{}{}{}\n", &caps[1], &caps[2], update.source_link);
			content = content.replacen(&caps[0], &replacement, 1);
		}
	}

	content = LAST_UPDATED_RE
		.replace(&content, format!("**Last Updated**: {today}"))
		.to_string();

	if update.increment_frequency {
		if let Some(caps) = FREQUENCY_RE.captures(&content) {
			let count: u32 = caps[1].parse().unwrap_or(0);
			let next = count + 1;
			let plural = if next == 1 { "" } else { "s" };
			content = content.replacen(
				&caps[0],
				&format!("This theme appears in {next} interview{plural}"),
				1,
			);
		}
	}

	content
}

fn instantiate(template: &str, update: &SynthesisUpdate<'_>, today: &str) -> String {
	let mut content = template.replace(TITLE_PLACEHOLDER, &format!("# {}", update.title));
	content = content.replacen(DESCRIPTION_PLACEHOLDER, &update.description, 1);

	if let Some(quote) = update.quotes.first() {
		content = content.replacen(QUOTE_PLACEHOLDER, &quote.to_block(), 1);
	}

	content = content.replacen(SOURCE_PLACEHOLDER, update.source_link, 1);
	content = content.replacen(FREQUENCY_PLACEHOLDER, "This theme appears in 1 interview", 1);
	content =
		content.replacen(LAST_UPDATED_PLACEHOLDER, &format!("**Last Updated**: {today}"), 1);

	content
}
