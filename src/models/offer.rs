use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::offer::{NewProductOffer as DomainNewProductOffer, ProductOffer as DomainProductOffer};
use crate::domain::types::{
    Description, InventoryCount, NonEmptyString, OfferCondition, OfferTitle, Price, Sku,
    TypeConstraintError,
};
use crate::models::catalog::{images_to_json, json_to_images, json_to_map, map_to_json};

/// Diesel model representing the `product_offers` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::product_offers)]
pub struct ProductOffer {
    pub id: i32,
    pub catalog_id: i32,
    pub vendor_id: i32,
    pub price: f64,
    pub compare_price: Option<f64>,
    pub condition: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub storage: Option<String>,
    pub other_variants: String,
    pub sku: String,
    pub inventory_quantity: i32,
    pub track_inventory: bool,
    pub title: String,
    pub description: Option<String>,
    pub images: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`ProductOffer`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_offers)]
pub struct NewProductOffer {
    pub catalog_id: i32,
    pub vendor_id: i32,
    pub price: f64,
    pub compare_price: Option<f64>,
    pub condition: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub storage: Option<String>,
    pub other_variants: String,
    pub sku: String,
    pub inventory_quantity: i32,
    pub track_inventory: bool,
    pub title: String,
    pub description: Option<String>,
    pub images: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ProductOffer> for DomainProductOffer {
    type Error = TypeConstraintError;

    fn try_from(offer: ProductOffer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: offer.id.try_into()?,
            catalog_id: offer.catalog_id.try_into()?,
            vendor_id: offer.vendor_id.try_into()?,
            price: Price::new(offer.price)?,
            compare_price: offer.compare_price.map(Price::new).transpose()?,
            condition: OfferCondition::try_from(offer.condition)?,
            color: offer.color.map(NonEmptyString::new).transpose()?,
            size: offer.size.map(NonEmptyString::new).transpose()?,
            storage: offer.storage.map(NonEmptyString::new).transpose()?,
            other_variants: json_to_map(&offer.other_variants)?,
            sku: Sku::new(offer.sku)?,
            inventory_quantity: InventoryCount::new(offer.inventory_quantity)?,
            track_inventory: offer.track_inventory,
            title: OfferTitle::new(offer.title)?,
            description: offer.description.map(Description::new).transpose()?,
            images: json_to_images(&offer.images)?,
            is_active: offer.is_active,
            is_featured: offer.is_featured,
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        })
    }
}

impl From<DomainNewProductOffer> for NewProductOffer {
    fn from(offer: DomainNewProductOffer) -> Self {
        Self {
            catalog_id: offer.catalog_id.get(),
            vendor_id: offer.vendor_id.get(),
            price: offer.price.get(),
            compare_price: offer.compare_price.map(Price::get),
            condition: offer.condition.as_str().to_string(),
            color: offer.color.map(NonEmptyString::into_inner),
            size: offer.size.map(NonEmptyString::into_inner),
            storage: offer.storage.map(NonEmptyString::into_inner),
            other_variants: map_to_json(&offer.other_variants),
            sku: offer.sku.into_inner(),
            inventory_quantity: offer.inventory_quantity.get(),
            track_inventory: offer.track_inventory,
            title: offer.title.into_inner(),
            description: offer.description.map(Description::into_inner),
            images: images_to_json(&offer.images),
            is_active: offer.is_active,
            is_featured: offer.is_featured,
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        }
    }
}
