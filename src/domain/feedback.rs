use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CatalogId, ConfidenceScore, FeedbackId, NonEmptyString};

/// Outcome of one suggestion presentation, appended for offline calibration.
///
/// Records are write-once; nothing in the current system re-weights scoring
/// from them online.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    /// What the vendor typed when the suggestion was shown.
    pub query_text: NonEmptyString,
    pub suggested_catalog_id: CatalogId,
    pub accepted: bool,
    /// May differ from `suggested_catalog_id` when the user picked another
    /// suggestion from the list.
    pub chosen_catalog_id: Option<CatalogId>,
    pub confidence_at_time: Option<ConfidenceScore>,
    pub created_at: NaiveDateTime,
}

/// Information required to append a new [`FeedbackRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFeedbackRecord {
    pub query_text: NonEmptyString,
    pub suggested_catalog_id: CatalogId,
    pub accepted: bool,
    pub chosen_catalog_id: Option<CatalogId>,
    pub confidence_at_time: Option<ConfidenceScore>,
    pub created_at: NaiveDateTime,
}
