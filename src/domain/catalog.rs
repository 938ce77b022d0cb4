use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BrandName, CatalogId, CategoryId, Description, ImageUrl, ModelName, ProductName, Slug, UserId,
};

/// Canonical product record shared across vendors.
///
/// Catalog items are created either by an admin directly or by the catalog
/// resolver when a vendor submission finds no sufficiently confident match.
/// They are never deleted in normal flow, only deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogId,
    pub name: ProductName,
    pub brand: Option<BrandName>,
    pub model: Option<ModelName>,
    pub category_id: CategoryId,
    pub base_description: Option<Description>,
    /// Open key-value specification map (ordered for determinism).
    pub specifications: BTreeMap<String, String>,
    /// Ordered list of image URLs.
    pub images: Vec<ImageUrl>,
    /// Derived deterministically from `name`; at most 100 characters.
    pub slug: Slug,
    pub is_active: bool,
    pub created_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`CatalogItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCatalogItem {
    pub name: ProductName,
    pub brand: Option<BrandName>,
    pub model: Option<ModelName>,
    pub category_id: CategoryId,
    pub base_description: Option<Description>,
    pub specifications: BTreeMap<String, String>,
    pub images: Vec<ImageUrl>,
    pub slug: Slug,
    pub is_active: bool,
    pub created_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One row of the inverted keyword index backing candidate retrieval.
///
/// Rows are generated from the catalog item name at creation time, atomically
/// with the item itself, and are never independently mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordEntry {
    pub catalog_id: CatalogId,
    /// Lowercased token of length > 2.
    pub keyword: String,
    /// 3 when the token equals the item brand, 1 otherwise.
    pub weight: i32,
}
