//! Matcher: pluggable seam that turns a resume plus a normalized JD into a `MatchResult`.
//!
//! Default: `LexicalMatcher` (bag-of-words cosine + set-based gap analysis).
//! Implementations must be stateless: every call takes explicit inputs and
//! returns explicit outputs, so one instance is shared across concurrent tasks.

use crate::matching::gaps::gaps;
use crate::matching::normalizer::{normalize, NormalizeOptions, TokenSet};
use crate::matching::vectorizer::score;
use crate::models::document::Document;
use crate::models::match_result::MatchResult;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried into batch analysis as `Arc<dyn Matcher>`.
pub trait Matcher: Send + Sync {
    /// Options the job description must be normalized with before `analyze`.
    fn options(&self) -> NormalizeOptions;

    fn analyze(&self, resume: &Document, jd_tokens: &TokenSet) -> MatchResult;
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Pure lexical matcher. No I/O, no shared state, deterministic.
///
/// Algorithm:
/// 1. Normalize the resume with the configured tokenization policy
/// 2. score = cosine(term counts) × 100, rounded to two decimals
/// 3. matched / missing = JD vocabulary ∩ / − resume vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalMatcher {
    options: NormalizeOptions,
}

impl LexicalMatcher {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }
}

impl Matcher for LexicalMatcher {
    fn options(&self) -> NormalizeOptions {
        self.options
    }

    fn analyze(&self, resume: &Document, jd_tokens: &TokenSet) -> MatchResult {
        let resume_tokens = normalize(resume.content(), self.options);
        let analysis = gaps(&resume_tokens, jd_tokens);

        MatchResult {
            document_id: resume.id().to_string(),
            score: score(&resume_tokens, jd_tokens),
            matched: analysis.matched,
            missing: analysis.missing,
        }
    }
}

/// Compares two plain-text documents in one call.
pub fn match_texts(resume: &Document, job_description: &str, matcher: &dyn Matcher) -> MatchResult {
    let jd_tokens = normalize(job_description, matcher.options());
    matcher.analyze(resume, &jd_tokens)
}
