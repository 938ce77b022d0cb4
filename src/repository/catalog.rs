use diesel::prelude::*;

use crate::domain::catalog::{CatalogItem, KeywordEntry, NewCatalogItem};
use crate::domain::types::{CatalogId, CategoryId, ProductName};
use crate::matching::keywords::WeightedKeyword;
use crate::models::catalog::{
    CatalogItem as DbCatalogItem, NewCatalogItem as DbNewCatalogItem,
    NewKeywordEntry as DbNewKeywordEntry,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogListQuery, CatalogReader, CatalogWriter, DieselRepository};

impl CatalogReader for DieselRepository {
    fn get_catalog_item(&self, id: CatalogId) -> RepositoryResult<Option<CatalogItem>> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let item = catalog_items::table
            .filter(catalog_items::id.eq(id.get()))
            .first::<DbCatalogItem>(&mut conn)
            .optional()?;

        let item = item.map(TryInto::try_into).transpose()?;
        Ok(item)
    }

    fn get_catalog_items_by_ids(&self, ids: &[CatalogId]) -> RepositoryResult<Vec<CatalogItem>> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let items = catalog_items::table
            .filter(catalog_items::id.eq_any(raw_ids))
            .order(catalog_items::id.asc())
            .load::<DbCatalogItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CatalogItem>, _>>()?;

        Ok(items)
    }

    fn find_catalog_item_by_name(
        &self,
        name: &ProductName,
        category_id: CategoryId,
    ) -> RepositoryResult<Option<CatalogItem>> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let item = catalog_items::table
            .filter(catalog_items::name.eq(name.as_str()))
            .filter(catalog_items::category_id.eq(category_id.get()))
            .first::<DbCatalogItem>(&mut conn)
            .optional()?;

        let item = item.map(TryInto::try_into).transpose()?;
        Ok(item)
    }

    fn list_catalog_items(
        &self,
        query: CatalogListQuery,
    ) -> RepositoryResult<(usize, Vec<CatalogItem>)> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = catalog_items::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(catalog_items::category_id.eq(category_id.get()));
            }

            if !query.include_inactive {
                items = items.filter(catalog_items::is_active.eq(true));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let items = items
            .order(catalog_items::name.asc())
            .load::<DbCatalogItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CatalogItem>, _>>()?;

        Ok((total, items))
    }

    fn query_keyword_index(
        &self,
        tokens: &[String],
        category_id: Option<CategoryId>,
    ) -> RepositoryResult<Vec<KeywordEntry>> {
        use crate::schema::{catalog_items, catalog_keywords};

        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        let mut query = catalog_keywords::table
            .inner_join(catalog_items::table)
            .select((
                catalog_keywords::catalog_id,
                catalog_keywords::keyword,
                catalog_keywords::weight,
            ))
            .filter(catalog_keywords::keyword.eq_any(tokens))
            .filter(catalog_items::is_active.eq(true))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = category_id {
            query = query.filter(catalog_items::category_id.eq(category_id.get()));
        }

        let rows: Vec<(i32, String, i32)> = query.load(&mut conn)?;

        let entries = rows
            .into_iter()
            .map(|(catalog_id, keyword, weight)| {
                Ok(KeywordEntry {
                    catalog_id: catalog_id.try_into()?,
                    keyword,
                    weight,
                })
            })
            .collect::<Result<Vec<KeywordEntry>, crate::domain::types::TypeConstraintError>>()?;

        Ok(entries)
    }
}

impl CatalogWriter for DieselRepository {
    fn create_catalog_item(
        &self,
        item: &NewCatalogItem,
        keywords: &[WeightedKeyword],
    ) -> RepositoryResult<CatalogItem> {
        use crate::schema::{catalog_items, catalog_keywords};

        let mut conn = self.conn()?;
        let db_item: DbNewCatalogItem = item.clone().into();

        let created = conn.transaction(|conn| {
            let created: DbCatalogItem = diesel::insert_into(catalog_items::table)
                .values(&db_item)
                .get_result(conn)?;

            let db_keywords: Vec<DbNewKeywordEntry> = keywords
                .iter()
                .map(|keyword| DbNewKeywordEntry {
                    catalog_id: created.id,
                    keyword: keyword.keyword.clone(),
                    weight: keyword.weight,
                })
                .collect();

            diesel::insert_into(catalog_keywords::table)
                .values(&db_keywords)
                .execute(conn)?;

            Ok::<DbCatalogItem, diesel::result::Error>(created)
        })?;

        Ok(created.try_into()?)
    }

    fn deactivate_catalog_item(&self, id: CatalogId) -> RepositoryResult<usize> {
        use crate::schema::catalog_items;

        let mut conn = self.conn()?;

        let affected = diesel::update(catalog_items::table.filter(catalog_items::id.eq(id.get())))
            .set((
                catalog_items::is_active.eq(false),
                catalog_items::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
