//! Axum route handlers for the Analysis API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::batch::run_analysis;
use crate::analysis::form::AnalysisForm;
use crate::errors::AppError;
use crate::matching::{match_texts, LexicalMatcher, NormalizeOptions};
use crate::models::document::Document;
use crate::models::match_result::{DocumentFailure, MatchBand, MatchResult};
use crate::models::report::AnalysisReport;
use crate::report::{
    dispatch, learn_more_links, render_csv, render_summary, suggestions, DeliveryOutcome,
    LearnMoreLink, ReportDelivery,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScoredResume {
    #[serde(flatten)]
    pub result: MatchResult,
    pub band: MatchBand,
    pub suggestions: String,
    pub learn_more: Vec<LearnMoreLink>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub options: NormalizeOptions,
    pub job_description_terms: usize,
    pub results: Vec<ScoredResume>,
    pub failures: Vec<DocumentFailure>,
    pub summary: String,
    pub delivery: Vec<DeliveryOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub strict_alpha_tokens: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Scores every uploaded resume against the job description and hands the
/// text summary to the configured report sinks.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = AnalysisForm::from_multipart(multipart).await?;
    let email = form.email.clone();
    let report = analyze_form(&state, form).await?;

    let top_missing = state.config.report_top_missing;
    let summary = render_summary(&report, top_missing);
    let delivery = dispatch(
        &state.sinks,
        &ReportDelivery {
            analysis_id: report.analysis_id,
            recipient: email.as_deref(),
            summary: &summary,
        },
    )
    .await;

    let results = report
        .results
        .into_iter()
        .map(|result| -> Result<ScoredResume, AppError> {
            Ok(ScoredResume {
                band: result.band(),
                suggestions: suggestions(&result, top_missing),
                learn_more: learn_more_links(&result, top_missing)?,
                result,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(AnalysisResponse {
        analysis_id: report.analysis_id,
        generated_at: report.generated_at,
        options: report.options,
        job_description_terms: report.job_description_terms,
        results,
        failures: report.failures,
        summary,
        delivery,
    }))
}

/// POST /api/v1/analyses/summary
///
/// Same form as `handle_analyze`; returns the summary as a downloadable text file.
pub async fn handle_summary_download(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = AnalysisForm::from_multipart(multipart).await?;
    let report = analyze_form(&state, form).await?;
    let summary = render_summary(&report, state.config.report_top_missing);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"match_summary.txt\"",
            ),
        ],
        summary,
    ))
}

/// POST /api/v1/analyses/csv
pub async fn handle_csv_download(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = AnalysisForm::from_multipart(multipart).await?;
    let report = analyze_form(&state, form).await?;
    let csv = render_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"match_summary.csv\"",
            ),
        ],
        csv,
    ))
}

/// POST /api/v1/match
///
/// Plain-text comparison without extraction. Useful for pasted resumes.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let options = resolve_options(&state, request.strict_alpha_tokens);
    let document = Document::new(
        request.document_id.unwrap_or_else(|| "resume".to_string()),
        request.resume_text,
    );
    let matcher = LexicalMatcher::new(options);

    Ok(Json(match_texts(&document, &request.job_description, &matcher)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn resolve_options(state: &AppState, strict_alpha_tokens: Option<bool>) -> NormalizeOptions {
    NormalizeOptions {
        strict_alpha_tokens: strict_alpha_tokens
            .unwrap_or(state.config.normalize.strict_alpha_tokens),
    }
}

/// Runs the batch and rejects it only when not a single resume could be read.
async fn analyze_form(state: &AppState, form: AnalysisForm) -> Result<AnalysisReport, AppError> {
    let options = resolve_options(state, form.strict_alpha_tokens);
    let matcher = Arc::new(LexicalMatcher::new(options));

    let report = run_analysis(
        Arc::clone(&state.extractor),
        matcher,
        form.resumes,
        &form.job_description,
    )
    .await;

    if report.results.is_empty() {
        let reasons: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.document_id, f.error))
            .collect();
        return Err(AppError::UnprocessableEntity(format!(
            "no resume could be analyzed ({})",
            reasons.join("; ")
        )));
    }

    Ok(report)
}
