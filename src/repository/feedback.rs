use diesel::prelude::*;

use crate::domain::feedback::{FeedbackRecord, NewFeedbackRecord};
use crate::models::feedback::{
    FeedbackRecord as DbFeedbackRecord, NewFeedbackRecord as DbNewFeedbackRecord,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FeedbackListQuery, FeedbackReader, FeedbackWriter};

impl FeedbackReader for DieselRepository {
    fn list_feedback(
        &self,
        query: FeedbackListQuery,
    ) -> RepositoryResult<(usize, Vec<FeedbackRecord>)> {
        use crate::schema::match_feedback;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut records = match_feedback::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(catalog_id) = query.suggested_catalog_id {
                records =
                    records.filter(match_feedback::suggested_catalog_id.eq(catalog_id.get()));
            }

            records
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut records = query_builder();
        if let Some(pagination) = &query.pagination {
            records = records
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let records = records
            .order(match_feedback::created_at.desc())
            .load::<DbFeedbackRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<FeedbackRecord>, _>>()?;

        Ok((total, records))
    }
}

impl FeedbackWriter for DieselRepository {
    fn create_feedback(&self, record: &NewFeedbackRecord) -> RepositoryResult<usize> {
        use crate::schema::match_feedback;

        let mut conn = self.conn()?;
        let db_record: DbNewFeedbackRecord = record.clone().into();

        let inserted = diesel::insert_into(match_feedback::table)
            .values(&db_record)
            .execute(&mut conn)?;

        Ok(inserted)
    }
}
