use serde::{Deserialize, Serialize};

/// Outcome of comparing one resume against the job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_id: String,
    /// Cosine similarity as a percentage, 0.0 to 100.0, two decimals.
    pub score: f64,
    /// Job-description terms also present in the resume, in JD order.
    pub matched: Vec<String>,
    /// Job-description terms absent from the resume, in JD order.
    pub missing: Vec<String>,
}

impl MatchResult {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_score(self.score)
    }
}

/// Coarse grading of a match score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Strong,
    Moderate,
    Weak,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            MatchBand::Strong
        } else if score >= 40.0 {
            MatchBand::Moderate
        } else {
            MatchBand::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchBand::Strong => "strong",
            MatchBand::Moderate => "moderate",
            MatchBand::Weak => "weak",
        }
    }
}

/// A resume that could not be analyzed, usually because extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document_id: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(MatchBand::from_score(100.0), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(75.0), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(74.99), MatchBand::Moderate);
        assert_eq!(MatchBand::from_score(40.0), MatchBand::Moderate);
        assert_eq!(MatchBand::from_score(39.99), MatchBand::Weak);
        assert_eq!(MatchBand::from_score(0.0), MatchBand::Weak);
    }

    #[test]
    fn test_band_serializes_snake_case() {
        let json = serde_json::to_string(&MatchBand::Moderate).unwrap();
        assert_eq!(json, r#""moderate""#);
    }
}
