use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::matching::NormalizeOptions;
use crate::models::match_result::{DocumentFailure, MatchResult};

/// Everything produced by one batch run: many resumes against one job description.
/// Lives only as long as the request that built it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub options: NormalizeOptions,
    /// Distinct terms in the normalized job description.
    pub job_description_terms: usize,
    /// One entry per successfully extracted resume, in submission order.
    pub results: Vec<MatchResult>,
    pub failures: Vec<DocumentFailure>,
}
