//! Normalizer: turns raw extracted text into a canonical lowercase token stream.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Tokenization policy. Changes matching results materially (version numbers,
/// `c++`, hyphenated terms), so it is always chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// `true`: split on non-word characters and keep alphabetic-only tokens.
    /// `false`: collapse whitespace and keep every whitespace-separated chunk.
    #[serde(default = "default_strict_alpha_tokens")]
    pub strict_alpha_tokens: bool,
}

fn default_strict_alpha_tokens() -> bool {
    true
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strict_alpha_tokens: default_strict_alpha_tokens(),
        }
    }
}

/// Ordered sequence of normalized tokens, with set views derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    #[cfg(test)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn unique(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    /// Distinct tokens in order of first appearance.
    pub fn distinct_in_order(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Bag-of-words counts, keyed in sorted order.
    pub fn term_counts(&self) -> BTreeMap<&str, u32> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Tokens joined by single spaces. Re-normalizing this yields the same set.
    #[cfg(test)]
    pub fn as_text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Lowercases and tokenizes `raw_text` under the given policy.
/// Total: empty or symbol-only input gives an empty `TokenSet`.
pub fn normalize(raw_text: &str, options: NormalizeOptions) -> TokenSet {
    let lowered = raw_text.to_lowercase();

    let tokens = if options.strict_alpha_tokens {
        lowered
            .split(|c: char| !is_word_char(c))
            .filter(|t| !t.is_empty())
            .filter(|t| t.chars().all(char::is_alphabetic))
            .map(str::to_owned)
            .collect()
    } else {
        lowered.split_whitespace().map(str::to_owned).collect()
    };

    TokenSet { tokens }
}

/// Letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: NormalizeOptions = NormalizeOptions {
        strict_alpha_tokens: true,
    };
    const WHITESPACE: NormalizeOptions = NormalizeOptions {
        strict_alpha_tokens: false,
    };

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        let tokens = normalize("Looking for Python, Java, and SQL expertise", STRICT);
        assert_eq!(
            tokens.tokens(),
            ["looking", "for", "python", "java", "and", "sql", "expertise"]
        );
    }

    #[test]
    fn test_strict_drops_tokens_with_digits_or_underscores() {
        let tokens = normalize("Python3 rust 2024 snake_case k8s go", STRICT);
        assert_eq!(tokens.tokens(), ["rust", "go"]);
    }

    #[test]
    fn test_strict_splits_symbols_out_of_words() {
        let tokens = normalize("C++ / C# and node.js", STRICT);
        assert_eq!(tokens.tokens(), ["c", "c", "and", "node", "js"]);
    }

    #[test]
    fn test_whitespace_policy_keeps_symbols_and_digits() {
        let tokens = normalize("  C++\n\tPython3.11   node.js ", WHITESPACE);
        assert_eq!(tokens.tokens(), ["c++", "python3.11", "node.js"]);
    }

    #[test]
    fn test_empty_input_yields_empty_token_set() {
        assert!(normalize("", STRICT).is_empty());
        assert!(normalize("   \n\t", WHITESPACE).is_empty());
        assert!(normalize("123 -- 456", STRICT).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize("Python", STRICT), normalize("python", STRICT));
        assert_eq!(normalize("PYTHON", WHITESPACE), normalize("python", WHITESPACE));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "I have Python and SQL skills",
            "Senior Rust Engineer: 5+ years, distributed-systems, Kafka/K8s!",
            "Çava über naïve résumé",
            "",
        ];
        for options in [STRICT, WHITESPACE] {
            for input in inputs {
                let once = normalize(input, options);
                let twice = normalize(&once.as_text(), options);
                assert_eq!(once, twice, "not idempotent for {input:?} ({options:?})");
            }
        }
    }

    #[test]
    fn test_unique_and_counts() {
        let tokens = normalize("rust go rust RUST", STRICT);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.unique().into_iter().collect::<Vec<_>>(), ["go", "rust"]);
        let counts = tokens.term_counts();
        assert_eq!(counts["rust"], 3);
        assert_eq!(counts["go"], 1);
    }

    #[test]
    fn test_distinct_in_order_keeps_first_appearance() {
        let tokens = normalize("sql python sql java python", STRICT);
        assert_eq!(tokens.distinct_in_order(), ["sql", "python", "java"]);
    }

    #[test]
    fn test_options_default_to_strict() {
        assert!(NormalizeOptions::default().strict_alpha_tokens);
        let parsed: NormalizeOptions = serde_json::from_str("{}").unwrap();
        assert!(parsed.strict_alpha_tokens);
    }
}
