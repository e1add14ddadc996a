//! Orchestration: one analysis document in, synthesis/index updates out.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::error::{KbError, Result};
use crate::index::{self, IndexEntry};
use crate::markdown::{self, Quote};
use crate::synthesis::{self, SynthesisUpdate};

static CALL_SUMMARY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)## Call Summary\n\n(.*?)\n\n").unwrap());

/// Quotes carried into each synthesis kind.
const THEME_QUOTE_LIMIT: usize = 3;
const PERSONA_QUOTE_LIMIT: usize = 5;

/// Which documents this run touched, by kind.
#[derive(Debug, Default, Serialize)]
pub struct UpdatedByKind {
	pub theme: Vec<String>,
	pub product: Vec<String>,
	pub persona: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
	pub updated: UpdatedByKind,
	pub created: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
	pub total_interviews: usize,
	pub total_syntheses: usize,
}

#[derive(Debug, Serialize)]
pub struct RunOutcome {
	pub success: bool,
	pub report: Report,
	pub stats: Stats,
}

/// Folds `analysis_file` into the knowledge base rooted at `base_dir`.
pub fn run(analysis_file: &Path, base_dir: &Path) -> Result<RunOutcome> {
	if !analysis_file.exists() {
		return Err(KbError::AnalysisNotFound(analysis_file.to_path_buf()));
	}

	let content = fs::read_to_string(analysis_file)?;
	let (raw, body) = markdown::split_frontmatter(&content)?;
	let frontmatter = markdown::parse_frontmatter(&raw)?;

	let quotes = markdown::extract_key_quotes(&body);
	let customer_name = frontmatter.customer_name();
	let filename = analysis_file
		.file_name()
		.map(|n| n.to_string_lossy().to_string())
		.unwrap_or_default();
	let source_link = format!(
		"- [{} {}, {}](../interview-analysis/{})",
		frontmatter.date, customer_name, frontmatter.company, filename
	);

	let synthesis_dir = base_dir.join("syntheses");
	let template_path = synthesis_dir.join("_SYNTHESIS_TEMPLATE.md");
	if !template_path.exists() {
		return Err(KbError::TemplateNotFound(template_path));
	}
	let template = fs::read_to_string(&template_path)?;
	let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

	let mut report = Report::default();

	for theme in &frontmatter.themes {
		let doc = fold_one(
			&synthesis_dir.join("by-theme"),
			theme,
			&format!("Insights and patterns related to {theme}."),
			&quotes[..quotes.len().min(THEME_QUOTE_LIMIT)],
			&source_link,
			&template,
			&today,
		)?;
		match doc {
			Folded::Updated(name) => report.updated.theme.push(name),
			Folded::Created(name) => report.created.push(format!("syntheses/by-theme/{name}")),
		}
	}

	for product in &frontmatter.products {
		let doc = fold_one(
			&synthesis_dir.join("by-product"),
			product,
			&format!("Customer feedback and pain points related to {product}."),
			&quotes[..quotes.len().min(THEME_QUOTE_LIMIT)],
			&source_link,
			&template,
			&today,
		)?;
		match doc {
			Folded::Updated(name) => report.updated.product.push(name),
			Folded::Created(name) => report.created.push(format!("syntheses/by-product/{name}")),
		}
	}

	// Personas are keyed by the pluralized role.
	let persona = format!("{}s", frontmatter.role);
	let doc = fold_one(
		&synthesis_dir.join("by-persona"),
		&persona,
		&format!("Insights from interviews with {persona}."),
		&quotes[..quotes.len().min(PERSONA_QUOTE_LIMIT)],
		&source_link,
		&template,
		&today,
	)?;
	match doc {
		Folded::Updated(name) => report.updated.persona.push(name),
		Folded::Created(name) => report.created.push(format!("syntheses/by-persona/{name}")),
	}

	let brief = CALL_SUMMARY_RE
		.captures(&body)
		.and_then(|caps| caps[1].lines().next().map(str::to_string))
		.unwrap_or_default();

	let stats = index::gather_stats(base_dir);
	index::update(
		&base_dir.join("index.md"),
		&IndexEntry {
			date: frontmatter.date.clone(),
			name: customer_name,
			company: frontmatter.company.clone(),
			role: frontmatter.role.clone(),
			topics: frontmatter.themes.join(", "),
			filename,
			brief,
		},
		&stats,
	)?;
	info!(
		themes = frontmatter.themes.len(),
		products = frontmatter.products.len(),
		created = report.created.len(),
		"knowledge base updated"
	);

	let total_syntheses = report.updated.theme.len()
		+ report.updated.product.len()
		+ report.updated.persona.len()
		+ report.created.len();

	Ok(RunOutcome {
		success: true,
		report,
		stats: Stats { total_interviews: stats.total_interviews, total_syntheses },
	})
}

enum Folded {
	Updated(String),
	Created(String),
}

#[allow(clippy::too_many_arguments)]
fn fold_one(
	dir: &Path,
	title: &str,
	description: &str,
	quotes: &[Quote],
	source_link: &str,
	template: &str,
	today: &str,
) -> Result<Folded> {
	let doc_name = format!("{}.md", markdown::slugify(title));
	let path: PathBuf = dir.join(&doc_name);
	let exists = path.exists();

	synthesis::apply(
		&path,
		template,
		&SynthesisUpdate {
			title: title.to_string(),
			description: description.to_string(),
			quotes,
			source_link,
			increment_frequency: exists,
		},
		today,
	)?;

	Ok(if exists { Folded::Updated(doc_name) } else { Folded::Created(doc_name) })
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	const TEMPLATE: &str = "# [Theme/Product/Persona Name]\n\nBrief description of this theme/product/persona and why it matters.\n\n## Representative Quotes\n\n> \"Example quote from an interview that exemplifies this theme/pain point/pattern.\"\n>\n> — Attribution\n\n## Frequency\n\nThis theme appears in X interviews\n\n**Last Updated**: YYYY-MM-DD\n\n## Source Interviews\n\n- [YYYY-MM-DD Interview Title](../interview-analysis/filename.md)\n";

	const INDEX: &str = "# Interview Knowledge Base\n\n**Total Interviews**: 0\n\nSyntheses:\n- Themes: 0\n- Products: 0\n- Personas: 0\n\n## Recent Interviews\n\n- **2025-01-01**: Placeholder - Seed entry.\n\n## All Interviews by Date\n\n| Date | Name | Company | Role | Topics | Link |\n|------|------|---------|------|--------|------|\n\n## Methodology\n\nNotes.\n";

	const ANALYSIS: &str = "---\ndate: 2025-06-12\ncustomer_first: Dana\ncustomer_last: Reyes\ncompany: Acme Corp\nrole: Marketing Manager\ncall_type: discovery\nthemes:\n  - Reporting Gaps\nproducts:\n  - Analytics Suite\n---\n# Analysis\n\n## Call Summary\n\nDana walked through the reporting workflow.\nSecond line.\n\n## Key Quotes\n\n> \"The weekly report takes me half a day to build.\"\n>\n> — Dana Reyes, Acme Corp\n\n## Next Steps\n\n- follow up\n";

	fn seed_base(dir: &Path) {
		fs::create_dir_all(dir.join("syntheses/by-theme")).unwrap();
		fs::create_dir_all(dir.join("syntheses/by-product")).unwrap();
		fs::create_dir_all(dir.join("syntheses/by-persona")).unwrap();
		fs::create_dir_all(dir.join("interview-analysis")).unwrap();
		fs::write(dir.join("syntheses/_SYNTHESIS_TEMPLATE.md"), TEMPLATE).unwrap();
		fs::write(dir.join("index.md"), INDEX).unwrap();
	}

	#[test]
	fn first_run_creates_theme_product_and_persona_documents() {
		let base = tempdir().unwrap();
		seed_base(base.path());
		let analysis = base.path().join("interview-analysis/dana.md");
		fs::write(&analysis, ANALYSIS).unwrap();

		let outcome = run(&analysis, base.path()).unwrap();

		assert!(outcome.success);
		assert_eq!(outcome.report.created.len(), 3);
		assert!(outcome.report.created.contains(&"syntheses/by-theme/reporting-gaps.md".into()));
		assert!(outcome.report.created.contains(&"syntheses/by-product/analytics-suite.md".into()));
		assert!(
			outcome.report.created.contains(&"syntheses/by-persona/marketing-managers.md".into())
		);
		assert_eq!(outcome.stats.total_interviews, 1);

		let theme = fs::read_to_string(base.path().join("syntheses/by-theme/reporting-gaps.md")).unwrap();
		assert!(theme.starts_with("# Reporting Gaps"));
		assert!(theme.contains("This theme appears in 1 interview"));
		assert!(theme.contains("half a day to build"));

		let index = fs::read_to_string(base.path().join("index.md")).unwrap();
		assert!(index.contains("**Total Interviews**: 1"));
		assert!(index.contains("- Themes: 1"));
		assert!(index.contains("| 2025-06-12 | Dana Reyes | Acme Corp | Marketing Manager |"));
		assert!(index.contains("- **2025-06-12**: Dana Reyes - Dana walked through the reporting workflow."));
	}

	#[test]
	fn second_interview_updates_rather_than_creates() {
		let base = tempdir().unwrap();
		seed_base(base.path());
		let first = base.path().join("interview-analysis/dana.md");
		fs::write(&first, ANALYSIS).unwrap();
		run(&first, base.path()).unwrap();

		let second = base.path().join("interview-analysis/sam.md");
		fs::write(&second, ANALYSIS.replace("Dana", "Sam").replace("dana", "sam")).unwrap();
		let outcome = run(&second, base.path()).unwrap();

		assert_eq!(outcome.report.updated.theme, vec!["reporting-gaps.md"]);
		assert_eq!(outcome.report.updated.product, vec!["analytics-suite.md"]);
		assert_eq!(outcome.report.updated.persona, vec!["marketing-managers.md"]);
		assert!(outcome.report.created.is_empty());
		assert_eq!(outcome.stats.total_interviews, 2);

		let theme = fs::read_to_string(base.path().join("syntheses/by-theme/reporting-gaps.md")).unwrap();
		assert!(theme.contains("This theme appears in 2 interviews"));
	}

	#[test]
	fn missing_analysis_file_is_reported() {
		let base = tempdir().unwrap();
		seed_base(base.path());
		let err = run(&base.path().join("interview-analysis/nope.md"), base.path()).unwrap_err();
		assert!(matches!(err, KbError::AnalysisNotFound(_)));
	}

	#[test]
	fn missing_template_is_reported() {
		let base = tempdir().unwrap();
		seed_base(base.path());
		fs::remove_file(base.path().join("syntheses/_SYNTHESIS_TEMPLATE.md")).unwrap();
		let analysis = base.path().join("interview-analysis/dana.md");
		fs::write(&analysis, ANALYSIS).unwrap();

		let err = run(&analysis, base.path()).unwrap_err();
		assert!(matches!(err, KbError::TemplateNotFound(_)));
	}
}
