//! Batch analysis: many resumes against one job description.
//!
//! Each resume is independent: extraction and matching run in their own task,
//! and the only suspension point is the extractor. Results are collected back
//! in submission order; a failed resume becomes a `DocumentFailure` and the
//! rest of the batch carries on.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::{ExtractionError, TextExtractor, UploadedDocument};
use crate::matching::{normalize, Matcher, TokenSet};
use crate::models::document::Document;
use crate::models::match_result::{DocumentFailure, MatchResult};
use crate::models::report::AnalysisReport;

#[tracing::instrument(skip_all, fields(resumes = uploads.len()))]
pub async fn run_analysis(
    extractor: Arc<dyn TextExtractor>,
    matcher: Arc<dyn Matcher>,
    uploads: Vec<UploadedDocument>,
    job_description: &str,
) -> AnalysisReport {
    let options = matcher.options();
    let jd_tokens = Arc::new(normalize(job_description, options));
    let job_description_terms = jd_tokens.unique().len();

    let handles: Vec<_> = uploads
        .into_iter()
        .map(|upload| {
            let document_id = upload.filename.clone();
            let extractor = Arc::clone(&extractor);
            let matcher = Arc::clone(&matcher);
            let jd_tokens = Arc::clone(&jd_tokens);
            let handle = tokio::spawn(async move {
                analyze_upload(extractor.as_ref(), matcher.as_ref(), &jd_tokens, upload).await
            });
            (document_id, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut failures = Vec::new();

    for (document_id, handle) in handles {
        let error = match handle.await {
            Ok(Ok(result)) => {
                results.push(result);
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("analysis task failed: {e}"),
        };
        warn!(document = %document_id, "Resume skipped: {error}");
        failures.push(DocumentFailure { document_id, error });
    }

    info!(
        analyzed = results.len(),
        failed = failures.len(),
        jd_terms = job_description_terms,
        "Analysis complete"
    );

    AnalysisReport {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        options,
        job_description_terms,
        results,
        failures,
    }
}

async fn analyze_upload(
    extractor: &dyn TextExtractor,
    matcher: &dyn Matcher,
    jd_tokens: &TokenSet,
    upload: UploadedDocument,
) -> Result<MatchResult, ExtractionError> {
    let text = extractor.extract(&upload).await?;
    let document = Document::new(upload.filename, text);
    Ok(matcher.analyze(&document, jd_tokens))
}
