use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::domain::offer::ProductSubmission;
use crate::domain::types::{
    BrandName, CatalogId, CategoryId, Description, ImageUrl, InventoryCount, ModelName,
    NonEmptyString, OfferCondition, OfferTitle, Price, ProductName, TypeConstraintError, VendorId,
};

/// JSON body of a vendor product submission.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitProductForm {
    pub vendor_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: i32,
    pub description: Option<String>,
    /// Set when the vendor accepted one of the presented suggestions.
    pub catalog_id: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub compare_price: Option<f64>,
    #[serde(default = "default_condition")]
    pub condition: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub storage: Option<String>,
    #[serde(default)]
    pub other_variants: BTreeMap<String, String>,
    #[serde(default)]
    pub inventory_quantity: i32,
    #[serde(default = "default_true")]
    pub track_inventory: bool,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_condition() -> String {
    "new".to_string()
}

fn default_true() -> bool {
    true
}

fn optional<T>(
    value: Option<String>,
    build: impl Fn(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(build)
        .transpose()
}

impl SubmitProductForm {
    /// Converts the raw form into a validated domain submission.
    pub fn into_submission(self) -> Result<ProductSubmission, TypeConstraintError> {
        Ok(ProductSubmission {
            vendor_id: VendorId::new(self.vendor_id)?,
            name: ProductName::new(self.name)?,
            brand: optional(self.brand, BrandName::new)?,
            model: optional(self.model, ModelName::new)?,
            category_id: CategoryId::new(self.category_id)?,
            description: optional(self.description, Description::new)?,
            catalog_id: self.catalog_id.map(CatalogId::new).transpose()?,
            price: Price::new(self.price)?,
            compare_price: self.compare_price.map(Price::new).transpose()?,
            condition: OfferCondition::try_from(self.condition.as_str())?,
            color: optional(self.color, NonEmptyString::new)?,
            size: optional(self.size, NonEmptyString::new)?,
            storage: optional(self.storage, NonEmptyString::new)?,
            other_variants: self.other_variants,
            inventory_quantity: InventoryCount::new(self.inventory_quantity)?,
            track_inventory: self.track_inventory,
            title: OfferTitle::new(self.title)?,
            images: self
                .images
                .into_iter()
                .map(ImageUrl::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
