use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::catalog::{
    CatalogItem as DomainCatalogItem, KeywordEntry as DomainKeywordEntry,
    NewCatalogItem as DomainNewCatalogItem,
};
use crate::domain::types::{
    BrandName, Description, ImageUrl, ModelName, ProductName, Slug, TypeConstraintError,
};

/// Parses a JSON object column into an ordered string map.
pub(crate) fn json_to_map(raw: &str) -> Result<BTreeMap<String, String>, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("specification map: {e}")))
}

/// Serializes an ordered string map into its JSON column form.
pub(crate) fn map_to_json(map: &BTreeMap<String, String>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

/// Parses a JSON array column into validated image URLs.
pub(crate) fn json_to_images(raw: &str) -> Result<Vec<ImageUrl>, TypeConstraintError> {
    let urls: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("image list: {e}")))?;
    urls.into_iter().map(ImageUrl::new).collect()
}

/// Serializes image URLs into their JSON column form.
pub(crate) fn images_to_json(images: &[ImageUrl]) -> String {
    let urls: Vec<&str> = images.iter().map(ImageUrl::as_str).collect();
    serde_json::to_string(&urls).unwrap_or_else(|_| "[]".to_string())
}

/// Diesel model representing the `catalog_items` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::catalog_items)]
pub struct CatalogItem {
    pub id: i32,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: i32,
    pub base_description: Option<String>,
    pub specifications: String,
    pub images: String,
    pub slug: String,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`CatalogItem`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catalog_items)]
pub struct NewCatalogItem {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: i32,
    pub base_description: Option<String>,
    pub specifications: String,
    pub images: String,
    pub slug: String,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CatalogItem> for DomainCatalogItem {
    type Error = TypeConstraintError;

    fn try_from(item: CatalogItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            name: ProductName::new(item.name)?,
            brand: item.brand.map(BrandName::new).transpose()?,
            model: item.model.map(ModelName::new).transpose()?,
            category_id: item.category_id.try_into()?,
            base_description: item.base_description.map(Description::new).transpose()?,
            specifications: json_to_map(&item.specifications)?,
            images: json_to_images(&item.images)?,
            slug: Slug::from_stored(item.slug)?,
            is_active: item.is_active,
            created_by: item.created_by.try_into()?,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl From<DomainNewCatalogItem> for NewCatalogItem {
    fn from(item: DomainNewCatalogItem) -> Self {
        Self {
            name: item.name.into_inner(),
            brand: item.brand.map(BrandName::into_inner),
            model: item.model.map(ModelName::into_inner),
            category_id: item.category_id.get(),
            base_description: item.base_description.map(Description::into_inner),
            specifications: map_to_json(&item.specifications),
            images: images_to_json(&item.images),
            slug: item.slug.into_inner(),
            is_active: item.is_active,
            created_by: item.created_by.get(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Diesel model representing the `catalog_keywords` table.
#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::catalog_keywords)]
#[diesel(belongs_to(CatalogItem, foreign_key = catalog_id))]
pub struct KeywordEntry {
    pub id: i32,
    pub catalog_id: i32,
    pub keyword: String,
    pub weight: i32,
}

/// Insertable form of [`KeywordEntry`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catalog_keywords)]
pub struct NewKeywordEntry {
    pub catalog_id: i32,
    pub keyword: String,
    pub weight: i32,
}

impl TryFrom<KeywordEntry> for DomainKeywordEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: KeywordEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            catalog_id: entry.catalog_id.try_into()?,
            keyword: entry.keyword,
            weight: entry.weight,
        })
    }
}
