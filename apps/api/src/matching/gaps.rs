//! Gap Analyzer: set difference and intersection of JD and resume vocabularies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::normalizer::TokenSet;

/// Job-description terms split by whether the resume contains them.
/// Both lists follow first appearance in the job description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Compares unique vocabularies; term frequency is ignored on both sides.
///
/// An empty resume leaves every JD term missing. An empty JD yields two empty lists.
pub fn gaps(resume_tokens: &TokenSet, jd_tokens: &TokenSet) -> GapAnalysis {
    let resume_terms: BTreeSet<&str> = resume_tokens.unique();

    let (matched, missing): (Vec<&str>, Vec<&str>) = jd_tokens
        .distinct_in_order()
        .into_iter()
        .partition(|term| resume_terms.contains(term));

    GapAnalysis {
        matched: matched.into_iter().map(str::to_owned).collect(),
        missing: missing.into_iter().map(str::to_owned).collect(),
    }
}
