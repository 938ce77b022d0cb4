use crate::db::{DbConnection, DbPool};
use crate::domain::catalog::{CatalogItem, KeywordEntry, NewCatalogItem};
use crate::domain::category::{Category, NewCategory};
use crate::domain::feedback::{FeedbackRecord, NewFeedbackRecord};
use crate::domain::offer::{NewProductOffer, OfferSummary, ProductOffer};
use crate::domain::types::{CatalogId, CategoryId, OfferId, ProductName, VendorId};
use crate::matching::keywords::WeightedKeyword;
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod catalog;
pub mod category;
pub mod errors;
pub mod feedback;
pub mod offer;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing catalog items.
#[derive(Debug, Clone, Default)]
pub struct CatalogListQuery {
    /// Restrict to a category.
    pub category_id: Option<CategoryId>,
    /// Include deactivated items.
    pub include_inactive: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CatalogListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Query parameters used when listing vendor offers.
#[derive(Debug, Clone, Default)]
pub struct OfferListQuery {
    /// Restrict to offers against one catalog item.
    pub catalog_id: Option<CatalogId>,
    /// Restrict to one vendor's offers.
    pub vendor_id: Option<VendorId>,
    /// Only active offers.
    pub active_only: bool,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl OfferListQuery {
    pub fn catalog(mut self, catalog_id: CatalogId) -> Self {
        self.catalog_id = Some(catalog_id);
        self
    }

    pub fn vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Query parameters for listing recorded match feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackListQuery {
    /// Restrict to feedback naming one suggested catalog item.
    pub suggested_catalog_id: Option<CatalogId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl FeedbackListQuery {
    pub fn suggested(mut self, catalog_id: CatalogId) -> Self {
        self.suggested_catalog_id = Some(catalog_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories in name order.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations for catalog items and their keyword index.
pub trait CatalogReader {
    /// Retrieve a catalog item by its identifier.
    fn get_catalog_item(&self, id: CatalogId) -> RepositoryResult<Option<CatalogItem>>;
    /// Retrieve several catalog items at once; missing ids are skipped.
    fn get_catalog_items_by_ids(&self, ids: &[CatalogId]) -> RepositoryResult<Vec<CatalogItem>>;
    /// Exact (name, category) lookup used after a unique-constraint conflict.
    fn find_catalog_item_by_name(
        &self,
        name: &ProductName,
        category_id: CategoryId,
    ) -> RepositoryResult<Option<CatalogItem>>;
    /// List catalog items matching the supplied query parameters.
    fn list_catalog_items(
        &self,
        query: CatalogListQuery,
    ) -> RepositoryResult<(usize, Vec<CatalogItem>)>;
    /// Fetch keyword index rows matching any of the given tokens, restricted
    /// to active catalog items and optionally to one category.
    fn query_keyword_index(
        &self,
        tokens: &[String],
        category_id: Option<CategoryId>,
    ) -> RepositoryResult<Vec<KeywordEntry>>;
}

/// Write operations for catalog items.
pub trait CatalogWriter {
    /// Persist a catalog item together with its keyword index rows as a
    /// single transactional unit. A failure leaves neither behind.
    fn create_catalog_item(
        &self,
        item: &NewCatalogItem,
        keywords: &[WeightedKeyword],
    ) -> RepositoryResult<CatalogItem>;
    /// Soft-delete a catalog item.
    fn deactivate_catalog_item(&self, id: CatalogId) -> RepositoryResult<usize>;
}

/// Read-only operations for vendor offers.
pub trait OfferReader {
    /// Retrieve an offer by its identifier.
    fn get_offer_by_id(&self, id: OfferId) -> RepositoryResult<Option<ProductOffer>>;
    /// List offers matching the supplied query parameters.
    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<ProductOffer>)>;
    /// Price/vendor pairs of all active offers for a catalog item.
    fn list_active_offer_summaries(
        &self,
        catalog_id: CatalogId,
    ) -> RepositoryResult<Vec<OfferSummary>>;
}

/// Write operations for vendor offers.
pub trait OfferWriter {
    /// Persist a new offer.
    fn create_offer(&self, offer: &NewProductOffer) -> RepositoryResult<ProductOffer>;
}

/// Read operations for recorded match feedback.
pub trait FeedbackReader {
    /// List feedback records, newest first.
    fn list_feedback(
        &self,
        query: FeedbackListQuery,
    ) -> RepositoryResult<(usize, Vec<FeedbackRecord>)>;
}

/// Append-only writer for match feedback.
pub trait FeedbackWriter {
    /// Append a feedback record.
    fn create_feedback(&self, record: &NewFeedbackRecord) -> RepositoryResult<usize>;
}
