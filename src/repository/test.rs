use std::cell::{Cell, RefCell};

use crate::domain::catalog::{CatalogItem, KeywordEntry, NewCatalogItem};
use crate::domain::category::{Category, NewCategory};
use crate::domain::feedback::{FeedbackRecord, NewFeedbackRecord};
use crate::domain::offer::{NewProductOffer, OfferSummary, ProductOffer};
use crate::domain::types::{CatalogId, CategoryId, OfferId, ProductName, VendorId};
use crate::matching::keywords::WeightedKeyword;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CatalogListQuery, CatalogReader, CatalogWriter, CategoryReader, CategoryWriter,
    FeedbackListQuery, FeedbackReader, FeedbackWriter, OfferListQuery, OfferReader, OfferWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: RefCell<TestState>,
    fail_keyword_writes: Cell<bool>,
}

#[derive(Default)]
struct TestState {
    categories: Vec<Category>,
    catalog_items: Vec<CatalogItem>,
    keywords: Vec<KeywordEntry>,
    offers: Vec<ProductOffer>,
    feedback: Vec<FeedbackRecord>,
    next_category_id: i32,
    next_catalog_id: i32,
    next_offer_id: i32,
    next_feedback_id: i32,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(items: Vec<(CatalogItem, Vec<KeywordEntry>)>) -> Self {
        let repo = Self::default();
        {
            let mut state = repo.state.borrow_mut();
            for (item, keywords) in items {
                state.next_catalog_id = state.next_catalog_id.max(item.id.get());
                state.catalog_items.push(item);
                state.keywords.extend(keywords);
            }
        }
        repo
    }

    pub fn push_category(&self, category: Category) {
        let mut state = self.state.borrow_mut();
        state.next_category_id = state.next_category_id.max(category.id.get());
        state.categories.push(category);
    }

    pub fn push_offer(&self, offer: ProductOffer) {
        let mut state = self.state.borrow_mut();
        state.next_offer_id = state.next_offer_id.max(offer.id.get());
        state.offers.push(offer);
    }

    pub fn feedback_records(&self) -> Vec<FeedbackRecord> {
        self.state.borrow().feedback.clone()
    }

    /// Make subsequent catalog writes fail while inserting keyword rows, the
    /// way a dropped or locked index table would.
    pub fn fail_keyword_writes(&self) {
        self.fail_keyword_writes.set(true);
    }

    pub fn keyword_rows(&self, catalog_id: CatalogId) -> Vec<KeywordEntry> {
        self.state
            .borrow()
            .keywords
            .iter()
            .filter(|k| k.catalog_id == catalog_id)
            .cloned()
            .collect()
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut items = self.state.borrow().categories.clone();
        items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .state
            .borrow()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state.borrow_mut();
        state.next_category_id += 1;
        let created = Category {
            id: state
                .next_category_id
                .try_into()
                .map_err(|_| RepositoryError::ValidationError("category id".into()))?,
            name: category.name.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        state.categories.push(created.clone());
        Ok(created)
    }
}

impl CatalogReader for TestRepository {
    fn get_catalog_item(&self, id: CatalogId) -> RepositoryResult<Option<CatalogItem>> {
        Ok(self
            .state
            .borrow()
            .catalog_items
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    fn get_catalog_items_by_ids(&self, ids: &[CatalogId]) -> RepositoryResult<Vec<CatalogItem>> {
        Ok(self
            .state
            .borrow()
            .catalog_items
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    fn find_catalog_item_by_name(
        &self,
        name: &ProductName,
        category_id: CategoryId,
    ) -> RepositoryResult<Option<CatalogItem>> {
        Ok(self
            .state
            .borrow()
            .catalog_items
            .iter()
            .find(|i| i.name == *name && i.category_id == category_id)
            .cloned())
    }

    fn list_catalog_items(
        &self,
        query: CatalogListQuery,
    ) -> RepositoryResult<(usize, Vec<CatalogItem>)> {
        let mut items = self.state.borrow().catalog_items.clone();
        if let Some(category_id) = query.category_id {
            items.retain(|i| i.category_id == category_id);
        }
        if !query.include_inactive {
            items.retain(|i| i.is_active);
        }
        let total = items.len();
        Ok((total, items))
    }

    fn query_keyword_index(
        &self,
        tokens: &[String],
        category_id: Option<CategoryId>,
    ) -> RepositoryResult<Vec<KeywordEntry>> {
        let state = self.state.borrow();
        let entries = state
            .keywords
            .iter()
            .filter(|k| tokens.contains(&k.keyword))
            .filter(|k| {
                state
                    .catalog_items
                    .iter()
                    .find(|i| i.id == k.catalog_id)
                    .map(|i| {
                        i.is_active && category_id.is_none_or(|c| i.category_id == c)
                    })
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        Ok(entries)
    }
}

impl CatalogWriter for TestRepository {
    fn create_catalog_item(
        &self,
        item: &NewCatalogItem,
        keywords: &[WeightedKeyword],
    ) -> RepositoryResult<CatalogItem> {
        let mut state = self.state.borrow_mut();

        let conflict = state
            .catalog_items
            .iter()
            .any(|i| i.name == item.name && i.category_id == item.category_id);
        if conflict {
            return Err(RepositoryError::DatabaseError(
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    Box::new("UNIQUE constraint failed: catalog_items.name".to_string()),
                ),
            ));
        }

        state.next_catalog_id += 1;
        let id: CatalogId = state
            .next_catalog_id
            .try_into()
            .map_err(|_| RepositoryError::ValidationError("catalog id".into()))?;

        let created = CatalogItem {
            id,
            name: item.name.clone(),
            brand: item.brand.clone(),
            model: item.model.clone(),
            category_id: item.category_id,
            base_description: item.base_description.clone(),
            specifications: item.specifications.clone(),
            images: item.images.clone(),
            slug: item.slug.clone(),
            is_active: item.is_active,
            created_by: item.created_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        state.catalog_items.push(created.clone());

        if self.fail_keyword_writes.get() {
            // A keyword insert failure aborts the whole transaction, taking
            // the catalog row with it.
            state.catalog_items.pop();
            return Err(RepositoryError::DatabaseError(
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::Unknown,
                    Box::new("no such table: catalog_keywords".to_string()),
                ),
            ));
        }

        for keyword in keywords {
            state.keywords.push(KeywordEntry {
                catalog_id: id,
                keyword: keyword.keyword.clone(),
                weight: keyword.weight,
            });
        }

        Ok(created)
    }

    fn deactivate_catalog_item(&self, id: CatalogId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let mut affected = 0;
        for item in state.catalog_items.iter_mut() {
            if item.id == id {
                item.is_active = false;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

impl OfferReader for TestRepository {
    fn get_offer_by_id(&self, id: OfferId) -> RepositoryResult<Option<ProductOffer>> {
        Ok(self
            .state
            .borrow()
            .offers
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<ProductOffer>)> {
        let mut offers = self.state.borrow().offers.clone();
        if let Some(catalog_id) = query.catalog_id {
            offers.retain(|o| o.catalog_id == catalog_id);
        }
        if let Some(vendor_id) = query.vendor_id {
            offers.retain(|o| o.vendor_id == vendor_id);
        }
        if query.active_only {
            offers.retain(|o| o.is_active);
        }
        let total = offers.len();
        Ok((total, offers))
    }

    fn list_active_offer_summaries(
        &self,
        catalog_id: CatalogId,
    ) -> RepositoryResult<Vec<OfferSummary>> {
        Ok(self
            .state
            .borrow()
            .offers
            .iter()
            .filter(|o| o.catalog_id == catalog_id && o.is_active)
            .map(|o| OfferSummary {
                vendor_id: o.vendor_id,
                price: o.price,
            })
            .collect())
    }
}

impl OfferWriter for TestRepository {
    fn create_offer(&self, offer: &NewProductOffer) -> RepositoryResult<ProductOffer> {
        let mut state = self.state.borrow_mut();
        state.next_offer_id += 1;
        let created = ProductOffer {
            id: state
                .next_offer_id
                .try_into()
                .map_err(|_| RepositoryError::ValidationError("offer id".into()))?,
            catalog_id: offer.catalog_id,
            vendor_id: offer.vendor_id,
            price: offer.price,
            compare_price: offer.compare_price,
            condition: offer.condition,
            color: offer.color.clone(),
            size: offer.size.clone(),
            storage: offer.storage.clone(),
            other_variants: offer.other_variants.clone(),
            sku: offer.sku.clone(),
            inventory_quantity: offer.inventory_quantity,
            track_inventory: offer.track_inventory,
            title: offer.title.clone(),
            description: offer.description.clone(),
            images: offer.images.clone(),
            is_active: offer.is_active,
            is_featured: offer.is_featured,
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        };
        state.offers.push(created.clone());
        Ok(created)
    }
}

impl FeedbackReader for TestRepository {
    fn list_feedback(
        &self,
        query: FeedbackListQuery,
    ) -> RepositoryResult<(usize, Vec<FeedbackRecord>)> {
        let mut records = self.state.borrow().feedback.clone();
        if let Some(catalog_id) = query.suggested_catalog_id {
            records.retain(|r| r.suggested_catalog_id == catalog_id);
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = records.len();
        Ok((total, records))
    }
}

impl FeedbackWriter for TestRepository {
    fn create_feedback(&self, record: &NewFeedbackRecord) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.next_feedback_id += 1;
        let created = FeedbackRecord {
            id: state
                .next_feedback_id
                .try_into()
                .map_err(|_| RepositoryError::ValidationError("feedback id".into()))?,
            query_text: record.query_text.clone(),
            suggested_catalog_id: record.suggested_catalog_id,
            accepted: record.accepted,
            chosen_catalog_id: record.chosen_catalog_id,
            confidence_at_time: record.confidence_at_time,
            created_at: record.created_at,
        };
        state.feedback.push(created);
        Ok(1)
    }
}
