//! Dual-threshold decision policy over scored catalog candidates.
//!
//! Two call sites need different risk tolerance: the unattended submission
//! path must not silently mis-link two different products, so it only links
//! above the stricter bar; the interactive typeahead can surface
//! lower-confidence candidates because a human confirms the choice.

use crate::domain::types::CatalogId;
use crate::matching::scoring::MatchScore;

/// Minimum confidence for unattended auto-linking.
pub const AUTO_LINK_THRESHOLD: f64 = 0.8;

/// Minimum confidence for surfacing a candidate to a human.
pub const SUGGEST_THRESHOLD: f64 = 0.7;

/// Caller intent for a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Unattended resolution; may link without confirmation.
    AutoLink,
    /// Interactive suggestion surfacing; never links on its own.
    Suggest,
}

/// One scored catalog candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub catalog_id: CatalogId,
    pub score: MatchScore,
}

/// Outcome of the decision policy.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision {
    /// Link to the existing catalog item without confirmation.
    AutoLink(CatalogId),
    /// Present the ranked candidates (all at or above the suggest threshold).
    Suggest(Vec<ScoredCandidate>),
    /// No candidate was convincing; create a new catalog entry.
    CreateNew,
}

/// Orders candidates by confidence descending, then catalog id ascending.
///
/// The id tie-break keeps the outcome deterministic regardless of retrieval
/// order; price-aware tie-breaking for display happens at the DTO layer where
/// offer prices are known.
pub fn rank_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .confidence
            .get()
            .partial_cmp(&a.score.confidence.get())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.catalog_id.cmp(&b.catalog_id))
    });
}

/// Thresholds the best candidate score into a [`MatchDecision`].
pub fn decide(mut candidates: Vec<ScoredCandidate>, mode: MatchMode) -> MatchDecision {
    if candidates.is_empty() {
        return MatchDecision::CreateNew;
    }

    rank_candidates(&mut candidates);
    let best = candidates[0].score.confidence.get();

    if mode == MatchMode::AutoLink && best >= AUTO_LINK_THRESHOLD {
        return MatchDecision::AutoLink(candidates[0].catalog_id);
    }

    if best >= SUGGEST_THRESHOLD {
        candidates.retain(|c| c.score.confidence.get() >= SUGGEST_THRESHOLD);
        return MatchDecision::Suggest(candidates);
    }

    MatchDecision::CreateNew
}
