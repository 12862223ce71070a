use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::media::Candidate;

/// Resolver tier that produced a match, highest confidence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    YearStrict,
    YearLoose,
    Strict,
    Loose,
    Partial,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::YearStrict => "year-strict",
            MatchType::YearLoose => "year-loose",
            MatchType::Strict => "strict",
            MatchType::Loose => "loose",
            MatchType::Partial => "partial",
        };
        write!(f, "{}", name)
    }
}

/// Winning candidate for a reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub similarity: f64,
    pub candidate: Candidate,
    pub match_type: MatchType,
    /// Sanitized form of the candidate title that matched
    pub sanitized_title: String,
    /// Candidate title as the provider reported it
    pub matched_title: String,
}

impl MatchResult {
    /// Whether the titles were identical, raw or sanitized
    ///
    /// `Loose` covers both sanitized equality and fuzzy matches, so the tier
    /// alone cannot answer this; every exact tier scores exactly 1.0.
    pub fn is_exact(&self) -> bool {
        self.similarity >= 1.0
    }
}
