use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::feedback::{
    FeedbackRecord as DomainFeedbackRecord, NewFeedbackRecord as DomainNewFeedbackRecord,
};
use crate::domain::types::{ConfidenceScore, NonEmptyString, TypeConstraintError};

/// Diesel model representing the `match_feedback` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::match_feedback)]
pub struct FeedbackRecord {
    pub id: i32,
    pub query_text: String,
    pub suggested_catalog_id: i32,
    pub accepted: bool,
    pub chosen_catalog_id: Option<i32>,
    pub confidence_at_time: Option<f64>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`FeedbackRecord`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::match_feedback)]
pub struct NewFeedbackRecord {
    pub query_text: String,
    pub suggested_catalog_id: i32,
    pub accepted: bool,
    pub chosen_catalog_id: Option<i32>,
    pub confidence_at_time: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<FeedbackRecord> for DomainFeedbackRecord {
    type Error = TypeConstraintError;

    fn try_from(record: FeedbackRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            query_text: NonEmptyString::new_for_field(record.query_text, "query text")?,
            suggested_catalog_id: record.suggested_catalog_id.try_into()?,
            accepted: record.accepted,
            chosen_catalog_id: record.chosen_catalog_id.map(TryInto::try_into).transpose()?,
            confidence_at_time: record
                .confidence_at_time
                .map(ConfidenceScore::new)
                .transpose()?,
            created_at: record.created_at,
        })
    }
}

impl From<DomainNewFeedbackRecord> for NewFeedbackRecord {
    fn from(record: DomainNewFeedbackRecord) -> Self {
        Self {
            query_text: record.query_text.into_inner(),
            suggested_catalog_id: record.suggested_catalog_id.get(),
            accepted: record.accepted,
            chosen_catalog_id: record.chosen_catalog_id.map(|id| id.get()),
            confidence_at_time: record.confidence_at_time.map(ConfidenceScore::get),
            created_at: record.created_at,
        }
    }
}
