use rand::Rng;

use crate::domain::offer::{NewProductOffer, ProductOffer, ProductSubmission};
use crate::domain::types::{Sku, VendorId};
use crate::models::config::OfferPolicy;
use crate::repository::{CatalogReader, CatalogWriter, CategoryReader, OfferWriter};
use crate::services::catalog::{CatalogResolution, resolve_catalog_item};

use super::{ServiceError, ServiceResult};

/// Result of a processed product submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub resolution: CatalogResolution,
    pub offer: ProductOffer,
}

/// Generates a vendor-scoped SKU of the form `V<vendor>-<seconds>-<random>`.
///
/// SKUs are assigned by the server and never taken from vendor input.
fn generate_sku(vendor_id: VendorId) -> String {
    let seconds = chrono::Utc::now().timestamp().rem_euclid(1_000_000);
    let suffix = rand::thread_rng().gen_range(0..10_000);
    format!("V{}-{:06}-{:04}", vendor_id.get(), seconds, suffix)
}

/// Core business logic for a vendor product submission.
///
/// When the vendor explicitly accepted a suggestion the submission carries a
/// catalog id, which is honored after an existence check. Otherwise the
/// catalog resolver decides between linking and creating. Either way exactly
/// one offer row is written, activated according to the marketplace policy.
pub fn submit_product<R>(
    submission: &ProductSubmission,
    policy: &OfferPolicy,
    repo: &R,
) -> ServiceResult<SubmitOutcome>
where
    R: CatalogReader + CatalogWriter + CategoryReader + OfferWriter,
{
    match repo.get_category_by_id(submission.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to check submission category: {e}");
            return Err(ServiceError::Storage);
        }
    }

    let resolution = match submission.catalog_id {
        Some(catalog_id) => match repo.get_catalog_item(catalog_id) {
            Ok(Some(item)) if item.is_active => CatalogResolution {
                catalog_id: item.id,
                created: false,
            },
            Ok(_) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to fetch accepted catalog item: {e}");
                return Err(ServiceError::Storage);
            }
        },
        None => resolve_catalog_item(submission, repo)?,
    };

    let sku = match Sku::new(generate_sku(submission.vendor_id)) {
        Ok(sku) => sku,
        Err(e) => {
            log::error!("Generated an invalid SKU: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let now = chrono::Utc::now().naive_utc();
    let new_offer = NewProductOffer {
        catalog_id: resolution.catalog_id,
        vendor_id: submission.vendor_id,
        price: submission.price,
        compare_price: submission.compare_price,
        condition: submission.condition,
        color: submission.color.clone(),
        size: submission.size.clone(),
        storage: submission.storage.clone(),
        other_variants: submission.other_variants.clone(),
        sku,
        inventory_quantity: submission.inventory_quantity,
        track_inventory: submission.track_inventory,
        title: submission.title.clone(),
        description: submission.description.clone(),
        images: submission.images.clone(),
        is_active: policy.auto_approve,
        is_featured: false,
        created_at: now,
        updated_at: now,
    };

    let offer = match repo.create_offer(&new_offer) {
        Ok(offer) => offer,
        Err(e) => {
            log::error!("Failed to create offer: {e}");
            return Err(ServiceError::Storage);
        }
    };

    Ok(SubmitOutcome { resolution, offer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CatalogItem, KeywordEntry};
    use crate::domain::types::{
        BrandName, CatalogId, CategoryId, InventoryCount, OfferCondition, OfferTitle, Price,
        ProductName, Slug, UserId,
    };
    use crate::matching::keywords::extract_keywords;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use std::collections::BTreeMap;

    fn epoch() -> chrono::NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn sample_item(id: i32, name: &str, brand: Option<&str>) -> (CatalogItem, Vec<KeywordEntry>) {
        let item = CatalogItem {
            id: CatalogId::new(id).unwrap(),
            name: ProductName::new(name).unwrap(),
            brand: brand.map(|b| BrandName::new(b).unwrap()),
            model: None,
            category_id: CategoryId::new(1).unwrap(),
            base_description: None,
            specifications: BTreeMap::new(),
            images: vec![],
            slug: Slug::from_name(name).unwrap(),
            is_active: true,
            created_by: UserId::new(1).unwrap(),
            created_at: epoch(),
            updated_at: epoch(),
        };
        let keywords = extract_keywords(name, brand)
            .into_iter()
            .map(|k| KeywordEntry {
                catalog_id: item.id,
                keyword: k.keyword,
                weight: k.weight,
            })
            .collect();
        (item, keywords)
    }

    fn seed_category(repo: &TestRepository) {
        repo.push_category(crate::domain::category::Category {
            id: CategoryId::new(1).unwrap(),
            name: crate::domain::types::CategoryName::new("Electronics").unwrap(),
            created_at: epoch(),
            updated_at: epoch(),
        });
    }

    fn sample_submission(name: &str, catalog_id: Option<i32>) -> ProductSubmission {
        ProductSubmission {
            vendor_id: VendorId::new(7).unwrap(),
            name: ProductName::new(name).unwrap(),
            brand: None,
            model: None,
            category_id: CategoryId::new(1).unwrap(),
            description: None,
            catalog_id: catalog_id.map(|id| CatalogId::new(id).unwrap()),
            price: Price::new(49.9).unwrap(),
            compare_price: None,
            condition: OfferCondition::New,
            color: None,
            size: None,
            storage: None,
            other_variants: BTreeMap::new(),
            inventory_quantity: InventoryCount::new(3).unwrap(),
            track_inventory: true,
            title: OfferTitle::new(name).unwrap(),
            images: vec![],
        }
    }

    #[test]
    fn honors_explicitly_accepted_catalog_id() {
        let repo = TestRepository::with_catalog(vec![sample_item(4, "Desk Lamp", None)]);
        seed_category(&repo);
        let policy = OfferPolicy { auto_approve: true };

        let outcome =
            submit_product(&sample_submission("Desk Lamp Deluxe", Some(4)), &policy, &repo)
                .unwrap();

        assert_eq!(outcome.resolution.catalog_id, 4);
        assert!(!outcome.resolution.created);
        assert_eq!(outcome.offer.catalog_id, 4);
        assert!(outcome.offer.is_active);
    }

    #[test]
    fn rejects_unknown_accepted_catalog_id() {
        let repo = TestRepository::new();
        seed_category(&repo);
        let policy = OfferPolicy { auto_approve: true };

        let err = submit_product(&sample_submission("Desk Lamp", Some(99)), &policy, &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn rejects_unknown_category() {
        let repo = TestRepository::new();
        let policy = OfferPolicy { auto_approve: true };

        let err = submit_product(&sample_submission("Desk Lamp", None), &policy, &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn unmatched_submission_creates_catalog_entry_and_offer() {
        let repo = TestRepository::new();
        seed_category(&repo);
        let policy = OfferPolicy { auto_approve: true };

        let outcome =
            submit_product(&sample_submission("Leather Office Chair", None), &policy, &repo)
                .unwrap();

        assert!(outcome.resolution.created);
        assert_eq!(outcome.offer.catalog_id, outcome.resolution.catalog_id);
        assert!(outcome.offer.sku.as_str().starts_with("V7-"));
    }

    #[test]
    fn manual_approval_policy_creates_inactive_offers() {
        let repo = TestRepository::new();
        seed_category(&repo);
        let policy = OfferPolicy {
            auto_approve: false,
        };

        let outcome =
            submit_product(&sample_submission("Leather Office Chair", None), &policy, &repo)
                .unwrap();

        assert!(!outcome.offer.is_active);
    }

    #[test]
    fn generated_skus_follow_the_vendor_pattern() {
        let sku = generate_sku(VendorId::new(12).unwrap());
        let parts: Vec<&str> = sku.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "V12");
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
    }
}
