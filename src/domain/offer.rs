use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BrandName, CatalogId, CategoryId, Description, ImageUrl, InventoryCount, ModelName,
    NonEmptyString, OfferCondition, OfferId, OfferTitle, Price, ProductName, Sku, VendorId,
};

/// A vendor's sellable listing against a catalog item.
///
/// `catalog_id` is immutable after creation; changing the product identity
/// requires a new offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOffer {
    pub id: OfferId,
    pub catalog_id: CatalogId,
    pub vendor_id: VendorId,
    pub price: Price,
    pub compare_price: Option<Price>,
    pub condition: OfferCondition,
    pub color: Option<NonEmptyString>,
    pub size: Option<NonEmptyString>,
    pub storage: Option<NonEmptyString>,
    pub other_variants: BTreeMap<String, String>,
    /// Server-generated; never vendor-editable.
    pub sku: Sku,
    pub inventory_quantity: InventoryCount,
    pub track_inventory: bool,
    pub title: OfferTitle,
    pub description: Option<Description>,
    pub images: Vec<ImageUrl>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`ProductOffer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProductOffer {
    pub catalog_id: CatalogId,
    pub vendor_id: VendorId,
    pub price: Price,
    pub compare_price: Option<Price>,
    pub condition: OfferCondition,
    pub color: Option<NonEmptyString>,
    pub size: Option<NonEmptyString>,
    pub storage: Option<NonEmptyString>,
    pub other_variants: BTreeMap<String, String>,
    pub sku: Sku,
    pub inventory_quantity: InventoryCount,
    pub track_inventory: bool,
    pub title: OfferTitle,
    pub description: Option<Description>,
    pub images: Vec<ImageUrl>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Price and vendor of one active offer, used to derive suggestion metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OfferSummary {
    pub vendor_id: VendorId,
    pub price: Price,
}

/// A validated vendor product submission, after form conversion.
///
/// `catalog_id` is populated when the vendor explicitly accepted a suggestion;
/// otherwise the catalog resolver decides the linkage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSubmission {
    pub vendor_id: VendorId,
    pub name: ProductName,
    pub brand: Option<BrandName>,
    pub model: Option<ModelName>,
    pub category_id: CategoryId,
    pub description: Option<Description>,
    pub catalog_id: Option<CatalogId>,
    pub price: Price,
    pub compare_price: Option<Price>,
    pub condition: OfferCondition,
    pub color: Option<NonEmptyString>,
    pub size: Option<NonEmptyString>,
    pub storage: Option<NonEmptyString>,
    pub other_variants: BTreeMap<String, String>,
    pub inventory_quantity: InventoryCount,
    pub track_inventory: bool,
    pub title: OfferTitle,
    pub images: Vec<ImageUrl>,
}
