use serde::Deserialize;
use validator::Validate;

use crate::domain::feedback::NewFeedbackRecord;
use crate::domain::types::{CatalogId, ConfidenceScore, NonEmptyString, TypeConstraintError};

/// JSON body reporting the outcome of a presented suggestion.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackForm {
    #[validate(length(min = 1, max = 255))]
    pub query_text: String,
    pub suggested_catalog_id: i32,
    pub accepted: bool,
    pub chosen_catalog_id: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_at_time: Option<f64>,
}

impl TryFrom<FeedbackForm> for NewFeedbackRecord {
    type Error = TypeConstraintError;

    fn try_from(form: FeedbackForm) -> Result<Self, Self::Error> {
        Ok(Self {
            query_text: NonEmptyString::new(form.query_text)?,
            suggested_catalog_id: CatalogId::new(form.suggested_catalog_id)?,
            accepted: form.accepted,
            chosen_catalog_id: form.chosen_catalog_id.map(CatalogId::new).transpose()?,
            confidence_at_time: form
                .confidence_at_time
                .map(ConfidenceScore::new)
                .transpose()?,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_form() {
        let form = FeedbackForm {
            query_text: "iphone 13".into(),
            suggested_catalog_id: 4,
            accepted: false,
            chosen_catalog_id: Some(9),
            confidence_at_time: Some(0.74),
        };
        let record = NewFeedbackRecord::try_from(form).unwrap();
        assert_eq!(record.suggested_catalog_id, 4);
        assert_eq!(record.chosen_catalog_id.unwrap(), 9);
        assert!(!record.accepted);
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let form = FeedbackForm {
            query_text: "iphone 13".into(),
            suggested_catalog_id: 4,
            accepted: true,
            chosen_catalog_id: None,
            confidence_at_time: Some(1.3),
        };
        assert!(NewFeedbackRecord::try_from(form).is_err());
    }
}
