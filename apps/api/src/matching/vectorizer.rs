//! Vectorizer/Scorer: bag-of-words cosine similarity between two token sets.
//!
//! Both inputs are projected onto a shared, sorted vocabulary so the dot product
//! and norms are always accumulated in the same order. The resulting scalar never
//! depends on hash iteration order.

use std::collections::{BTreeMap, BTreeSet};

use crate::matching::normalizer::TokenSet;

/// Sorted union of the distinct tokens of both inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary<'a> {
    terms: Vec<&'a str>,
}

impl<'a> Vocabulary<'a> {
    pub fn shared(a: &'a TokenSet, b: &'a TokenSet) -> Self {
        let mut terms: BTreeSet<&'a str> = a.unique();
        terms.extend(b.unique());
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    /// Term-count vector of `tokens` over this vocabulary.
    pub fn vectorize(&self, tokens: &TokenSet) -> Vec<f64> {
        let counts: BTreeMap<&str, u32> = tokens.term_counts();
        self.terms
            .iter()
            .map(|term| counts.get(term).copied().unwrap_or(0) as f64)
            .collect()
    }
}

/// Raw cosine similarity in `[0, 1]`. Zero when either side has no tokens.
pub fn cosine_similarity(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let vocabulary = Vocabulary::shared(a, b);
    let va = vocabulary.vectorize(a);
    let vb = vocabulary.vectorize(b);

    let dot: f64 = va.iter().zip(&vb).map(|(x, y)| x * y).sum();
    let norm_a = va.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = vb.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denominator = norm_a * norm_b;
    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(0.0, 1.0)
}

/// Similarity as a percentage in `[0, 100]`, rounded to two decimals.
pub fn score(a: &TokenSet, b: &TokenSet) -> f64 {
    round_to_hundredths(cosine_similarity(a, b) * 100.0)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
