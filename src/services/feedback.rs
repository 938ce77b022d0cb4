use crate::domain::feedback::{FeedbackRecord, NewFeedbackRecord};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CatalogReader, FeedbackListQuery, FeedbackReader, FeedbackWriter};

use super::{ServiceError, ServiceResult};

/// Appends a suggestion-outcome record.
///
/// The suggested catalog item must exist; beyond that the record is stored
/// as-is. Nothing reads it back on the hot path, it exists for offline
/// threshold calibration.
pub fn record_feedback<R>(record: &NewFeedbackRecord, repo: &R) -> ServiceResult<()>
where
    R: CatalogReader + FeedbackWriter,
{
    match repo.get_catalog_item(record.suggested_catalog_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to check suggested catalog item: {e}");
            return Err(ServiceError::Storage);
        }
    }

    match repo.create_feedback(record) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to record feedback: {e}");
            Err(ServiceError::Storage)
        }
    }
}

/// Lists recorded feedback, newest first.
pub fn list_feedback<R>(page: usize, repo: &R) -> ServiceResult<Paginated<FeedbackRecord>>
where
    R: FeedbackReader,
{
    match repo.list_feedback(FeedbackListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE)) {
        Ok((total, records)) => Ok(Paginated::new(
            records,
            page,
            total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list feedback: {e}");
            Err(ServiceError::Storage)
        }
    }
}
