//! Confidence scoring between a submitted product name and a catalog candidate.
//!
//! The score is a clamped weighted sum of three signals: brand equality,
//! query-token coverage of the candidate keyword set, and whole-string
//! similarity between normalized names. Scoring is deterministic and
//! monotonic: strengthening any one signal never lowers the result.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::domain::types::ConfidenceScore;
use crate::matching::keywords::tokenize;

/// Contribution of a case-insensitive brand match.
pub const BRAND_WEIGHT: f64 = 0.30;

/// Contribution of full query-token coverage.
pub const OVERLAP_WEIGHT: f64 = 0.45;

/// Contribution of full whole-string similarity.
pub const NAME_WEIGHT: f64 = 0.45;

/// Minimum whole-string similarity granted when one normalized name is a
/// prefix of the other. This lets short typeahead queries rank against the
/// longer catalog names they are leading up to.
const PREFIX_SIMILARITY_FLOOR: f64 = 0.6;

/// Raw whole-string similarity below which no "name similarity" reason is
/// reported.
const NAME_REASON_THRESHOLD: f64 = 0.5;

/// Weighted contributions below this floor are left out of the reasons list
/// to keep suggestion explanations quiet.
const REASON_FLOOR: f64 = 0.05;

/// Human-readable signal that contributed to a confidence score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    ExactName,
    BrandMatch,
    KeywordOverlap,
    NameSimilarity,
}

impl MatchReason {
    /// Wording shown in the suggestion UI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactName => "exact name",
            Self::BrandMatch => "brand match",
            Self::KeywordOverlap => "keyword overlap",
            Self::NameSimilarity => "name similarity",
        }
    }
}

impl Display for MatchReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A confidence score together with the signals that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub confidence: ConfidenceScore,
    pub reasons: Vec<MatchReason>,
}

/// Strips everything but ASCII alphanumerics and lowercases the rest, so that
/// case and spacing variants compare as the same string.
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Share of distinct query tokens present in the candidate token set.
fn token_coverage(input_tokens: &BTreeSet<String>, candidate_tokens: &BTreeSet<String>) -> f64 {
    if input_tokens.is_empty() {
        return 0.0;
    }
    let shared = input_tokens.intersection(candidate_tokens).count();
    shared as f64 / input_tokens.len() as f64
}

/// Normalized-Levenshtein similarity over alphanumeric-normalized names, with
/// a floor for prefix relationships (typeahead queries).
fn string_similarity(input: &str, candidate: &str) -> f64 {
    let a = normalize(input);
    let b = normalize(candidate);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let similarity = normalized_levenshtein(&a, &b);
    if a.starts_with(&b) || b.starts_with(&a) {
        similarity.max(PREFIX_SIMILARITY_FLOOR)
    } else {
        similarity
    }
}

/// Scores one catalog candidate against the submitted name and brand.
///
/// An exact case-insensitive full-name match short-circuits to 1.0. Otherwise
/// the weighted signals are summed and clamped into [0, 1], and only signals
/// that contributed above a small floor are reported as reasons.
pub fn score_candidate(
    input_name: &str,
    input_brand: Option<&str>,
    candidate_name: &str,
    candidate_brand: Option<&str>,
) -> MatchScore {
    let input_name = input_name.trim();
    let candidate_name = candidate_name.trim();

    if !input_name.is_empty() && input_name.to_lowercase() == candidate_name.to_lowercase() {
        return MatchScore {
            confidence: ConfidenceScore::clamped(1.0),
            reasons: vec![MatchReason::ExactName],
        };
    }

    let mut confidence = 0.0;
    let mut reasons = Vec::new();

    let brands_match = match (input_brand, candidate_brand) {
        (Some(lhs), Some(rhs)) => {
            let lhs = lhs.trim();
            !lhs.is_empty() && lhs.to_lowercase() == rhs.trim().to_lowercase()
        }
        _ => false,
    };
    if brands_match {
        confidence += BRAND_WEIGHT;
        reasons.push(MatchReason::BrandMatch);
    }

    let input_tokens: BTreeSet<String> = tokenize(input_name).into_iter().collect();
    let candidate_tokens: BTreeSet<String> = tokenize(candidate_name).into_iter().collect();
    let overlap = token_coverage(&input_tokens, &candidate_tokens) * OVERLAP_WEIGHT;
    if overlap > REASON_FLOOR {
        reasons.push(MatchReason::KeywordOverlap);
    }
    confidence += overlap;

    let similarity = string_similarity(input_name, candidate_name);
    if similarity >= NAME_REASON_THRESHOLD {
        reasons.push(MatchReason::NameSimilarity);
    }
    confidence += similarity * NAME_WEIGHT;

    MatchScore {
        confidence: ConfidenceScore::clamped(confidence),
        reasons,
    }
}
