//! Index document updates.
//!
//! `index.md` tracks totals, a capped recent-interviews list, and a table
//! of every interview. All edits are in-place textual surgery so the
//! surrounding prose survives untouched.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{KbError, Result};

static TOTAL_INTERVIEWS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\*\*Total Interviews\*\*: \d+").unwrap());

static THEME_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- Themes: \d+").unwrap());
static PRODUCT_COUNT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"- Products: \d+").unwrap());
static PERSONA_COUNT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"- Personas: \d+").unwrap());

static RECENT_SECTION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)(## Recent Interviews\n\n)(.*?)(\n\n##)").unwrap());

static TABLE_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)(## All Interviews by Date\n\n\| Date.*?\n\|[-|\s]+\|.*?)(\n\n##|\n\n$)")
		.unwrap()
});

/// Recent Interviews keeps only the newest entries.
const RECENT_LIMIT: usize = 10;

/// The row data contributed by one interview.
pub struct IndexEntry {
	pub date: String,
	pub name: String,
	pub company: String,
	pub role: String,
	pub topics: String,
	pub filename: String,
	pub brief: String,
}

/// Totals recomputed from the knowledge-base tree.
pub struct IndexStats {
	pub total_interviews: usize,
	pub theme_count: usize,
	pub product_count: usize,
	pub persona_count: usize,
}

/// Counts `.md` files in a directory, skipping `_`-prefixed scaffolding.
pub fn count_documents(dir: &Path) -> usize {
	let Ok(entries) = fs::read_dir(dir) else {
		return 0;
	};
	entries
		.filter_map(|e| e.ok())
		.filter(|e| {
			let name = e.file_name().to_string_lossy().to_string();
			name.ends_with(".md") && !name.starts_with('_')
		})
		.count()
}

/// Recomputes the stat block totals from the base directory.
pub fn gather_stats(base_dir: &Path) -> IndexStats {
	let syntheses = base_dir.join("syntheses");
	IndexStats {
		total_interviews: count_documents(&base_dir.join("interview-analysis")),
		theme_count: count_documents(&syntheses.join("by-theme")),
		product_count: count_documents(&syntheses.join("by-product")),
		persona_count: count_documents(&syntheses.join("by-persona")),
	}
}

/// Applies stats, the recent list, and the table row to `index.md`.
pub fn update(index_path: &Path, entry: &IndexEntry, stats: &IndexStats) -> Result<()> {
	if !index_path.exists() {
		return Err(KbError::IndexNotFound(index_path.to_path_buf()));
	}
	let content = fs::read_to_string(index_path)?;
	let content = apply(&content, entry, stats);
	fs::write(index_path, content)?;
	Ok(())
}

fn apply(content: &str, entry: &IndexEntry, stats: &IndexStats) -> String {
	let mut content = TOTAL_INTERVIEWS_RE
		.replace(content, format!("**Total Interviews**: {}", stats.total_interviews))
		.to_string();
	content =
		THEME_COUNT_RE.replace(&content, format!("- Themes: {}", stats.theme_count)).to_string();
	content = PRODUCT_COUNT_RE
		.replace(&content, format!("- Products: {}", stats.product_count))
		.to_string();
	content = PERSONA_COUNT_RE
		.replace(&content, format!("- Personas: {}", stats.persona_count))
		.to_string();

	if let Some(caps) = RECENT_SECTION_RE.captures(&content) {
		let new_entry = format!("- **{}**: {} - {}", entry.date, entry.name, entry.brief);
		let mut recent: Vec<String> = vec![new_entry];
		recent.extend(caps[2].lines().filter(|l| !l.trim().is_empty()).map(str::to_string));
		recent.truncate(RECENT_LIMIT);
		let replacement = format!("{}{}\n{}", &caps[1], recent.join("\n"), &caps[3]);
		content = content.replacen(&caps[0], &replacement, 1);
	}

	if let Some(caps) = TABLE_SECTION_RE.captures(&content) {
		let row = format!(
			"| {} | {} | {} | {} | {} | [Link](interview-analysis/{}) |\n",
			entry.date, entry.name, entry.company, entry.role, entry.topics, entry.filename
		);
		let table = &caps[1];
		// New rows land directly under the header separator line.
		if let Some(sep_start) = table.find("\n|---") {
			let rebuilt = match table[sep_start + 1..].find('\n') {
				Some(rel_end) => {
					let insert_at = sep_start + 1 + rel_end + 1;
					format!("{}{}{}", &table[..insert_at], row, &table[insert_at..])
				}
				// Separator is the last line: the table had no rows yet.
				None => format!("{}\n{}", table, row.trim_end()),
			};
			content = content.replacen(table, &rebuilt, 1);
		}
	}

	content
}
