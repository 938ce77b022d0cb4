//! The product-matching core: keyword extraction, similarity scoring and the
//! auto-link decision policy.
//!
//! Everything in this module is pure, synchronous and deterministic; candidate
//! retrieval and persistence live behind the repository traits and are
//! orchestrated by the service layer.

pub mod keywords;
pub mod policy;
pub mod scoring;

pub use keywords::{WeightedKeyword, extract_keywords};
pub use policy::{MatchDecision, MatchMode, ScoredCandidate, decide};
pub use scoring::{MatchReason, MatchScore, score_candidate};
