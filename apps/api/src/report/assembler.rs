//! Report Assembler: renders an `AnalysisReport` as text summary or CSV.
//!
//! Display truncation ("top N missing terms") lives here, never in the engine.

use anyhow::Context;
use reqwest::Url;
use serde::Serialize;

use crate::models::match_result::MatchResult;
use crate::models::report::AnalysisReport;

pub const DEFAULT_TOP_MISSING: usize = 10;

const LEARN_MORE_SEARCH: &str = "https://www.google.com/search";

/// Search link for one missing term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnMoreLink {
    pub term: String,
    pub url: String,
}

/// One block per resume, blocks separated by a blank line:
///
/// ```text
/// alice.pdf - Match: 46.29%
/// Missing Skills: looking, for, java, expertise
/// ```
pub fn render_summary(report: &AnalysisReport, top_missing: usize) -> String {
    let mut blocks: Vec<String> = report
        .results
        .iter()
        .map(|r| {
            format!(
                "{} - Match: {:.2}%\nMissing Skills: {}",
                r.document_id,
                r.score,
                truncated_terms(&r.missing, top_missing)
            )
        })
        .collect();

    blocks.extend(
        report
            .failures
            .iter()
            .map(|f| format!("{} - Extraction failed: {}", f.document_id, f.error)),
    );

    blocks.join("\n\n")
}

/// `document,score,band,matched,missing` with `;`-joined term lists.
pub fn render_csv(report: &AnalysisReport) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["document", "score", "band", "matched", "missing"])?;
    for r in &report.results {
        writer.write_record([
            r.document_id.clone(),
            format!("{:.2}", r.score),
            r.band().as_str().to_string(),
            r.matched.join(";"),
            r.missing.join(";"),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("failed to flush CSV export")?;
    Ok(String::from_utf8(bytes)?)
}

/// Short advice for one resume, based on what it is missing.
pub fn suggestions(result: &MatchResult, top_missing: usize) -> String {
    if result.missing.is_empty() {
        return "Resume covers all required terms.".to_string();
    }
    format!(
        "Consider incorporating these terms if they apply to you: {}.",
        truncated_terms(&result.missing, top_missing)
    )
}

/// One "how to learn" search link per missing term, capped at `top_missing`.
pub fn learn_more_links(result: &MatchResult, top_missing: usize) -> anyhow::Result<Vec<LearnMoreLink>> {
    result
        .missing
        .iter()
        .take(top_missing)
        .map(|term| -> anyhow::Result<LearnMoreLink> {
            let url = Url::parse_with_params(LEARN_MORE_SEARCH, &[("q", format!("how to learn {term}"))])?;
            Ok(LearnMoreLink {
                term: term.clone(),
                url: url.into(),
            })
        })
        .collect()
}

fn truncated_terms(terms: &[String], limit: usize) -> String {
    if terms.is_empty() {
        return "None".to_string();
    }
    let shown = terms
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match terms.len().saturating_sub(limit) {
        0 => shown,
        hidden => format!("{shown} (+{hidden} more)"),
    }
}
