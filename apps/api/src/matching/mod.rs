// Text-matching engine: normalization, bag-of-words scoring, gap analysis.
// Pure and synchronous. No I/O happens below this module.

pub mod gaps;
pub mod matcher;
pub mod normalizer;
pub mod vectorizer;

pub use matcher::{match_texts, LexicalMatcher, Matcher};
pub use normalizer::{normalize, NormalizeOptions, TokenSet};
