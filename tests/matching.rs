use std::collections::BTreeMap;

use agora_market::domain::catalog::NewCatalogItem;
use agora_market::domain::category::NewCategory;
use agora_market::domain::feedback::NewFeedbackRecord;
use agora_market::domain::offer::ProductSubmission;
use agora_market::domain::types::{
    BrandName, CategoryId, CategoryName, ConfidenceScore, InventoryCount, NonEmptyString,
    OfferCondition, OfferTitle, Price, ProductName, Slug, UserId, VendorId,
};
use agora_market::matching::keywords::extract_keywords;
use agora_market::models::config::OfferPolicy;
use agora_market::repository::{CatalogWriter, CategoryWriter, DieselRepository, OfferReader};
use agora_market::services::catalog::{SuggestQueryParams, suggest_catalog_matches};
use agora_market::services::feedback::record_feedback;
use agora_market::services::offers::submit_product;
use chrono::Utc;

mod common;

fn submission(
    vendor: i32,
    name: &str,
    brand: Option<&str>,
    category_id: CategoryId,
    price: f64,
) -> ProductSubmission {
    ProductSubmission {
        vendor_id: VendorId::new(vendor).expect("valid vendor id"),
        name: ProductName::new(name).expect("valid product name"),
        brand: brand.map(|b| BrandName::new(b).expect("valid brand")),
        model: None,
        category_id,
        description: None,
        catalog_id: None,
        price: Price::new(price).expect("valid price"),
        compare_price: None,
        condition: OfferCondition::New,
        color: None,
        size: None,
        storage: None,
        other_variants: BTreeMap::new(),
        inventory_quantity: InventoryCount::new(10).expect("valid inventory"),
        track_inventory: true,
        title: OfferTitle::new(name).expect("valid title"),
        images: vec![],
    }
}

fn new_catalog_item(name: &str, brand: Option<&str>, category_id: CategoryId) -> NewCatalogItem {
    let now = Utc::now().naive_utc();
    NewCatalogItem {
        name: ProductName::new(name).expect("valid product name"),
        brand: brand.map(|b| BrandName::new(b).expect("valid brand")),
        model: None,
        category_id,
        base_description: None,
        specifications: BTreeMap::new(),
        images: vec![],
        slug: Slug::from_name(name).expect("valid slug"),
        is_active: true,
        created_by: UserId::new(1).expect("valid user id"),
        created_at: now,
        updated_at: now,
    }
}

fn setup() -> (common::TestDb, DieselRepository, CategoryId, OfferPolicy) {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let category = repo
        .create_category(&NewCategory::new(
            CategoryName::new("Electronics").expect("valid category name"),
        ))
        .expect("should create category");
    let policy = OfferPolicy { auto_approve: true };
    (test_db, repo, category.id, policy)
}

#[test]
fn first_submission_creates_catalog_entry() {
    let (_db, repo, category, policy) = setup();

    let outcome = submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("submission should succeed");

    assert!(outcome.resolution.created);
    assert_eq!(outcome.offer.catalog_id, outcome.resolution.catalog_id);
    assert!(outcome.offer.is_active);
}

#[test]
fn identical_name_auto_links_second_vendor() {
    let (_db, repo, category, policy) = setup();

    let first = submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("first submission should succeed");

    let second = submit_product(
        &submission(2, "iphone 13 128gb", Some("Apple"), category, 779.0),
        &policy,
        &repo,
    )
    .expect("second submission should succeed");

    assert!(!second.resolution.created);
    assert_eq!(second.resolution.catalog_id, first.resolution.catalog_id);

    let summaries = repo
        .list_active_offer_summaries(first.resolution.catalog_id)
        .expect("should list offers");
    assert_eq!(summaries.len(), 2);
}

#[test]
fn spacing_variant_with_brand_auto_links() {
    let (_db, repo, category, policy) = setup();

    let first = submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("first submission should succeed");

    let second = submit_product(
        &submission(2, "Iphone13 128gb", Some("Apple"), category, 749.0),
        &policy,
        &repo,
    )
    .expect("second submission should succeed");

    assert!(!second.resolution.created);
    assert_eq!(second.resolution.catalog_id, first.resolution.catalog_id);
}

#[test]
fn different_product_sharing_tokens_gets_its_own_entry() {
    let (_db, repo, category, policy) = setup();

    let first = submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("first submission should succeed");

    let second = submit_product(
        &submission(2, "iPhone 14 Pro Max 256GB", Some("Apple"), category, 1199.0),
        &policy,
        &repo,
    )
    .expect("second submission should succeed");

    assert!(second.resolution.created);
    assert_ne!(second.resolution.catalog_id, first.resolution.catalog_id);
}

#[test]
fn disjoint_name_against_foreign_brand_catalog_creates_new_entry() {
    let (_db, repo, category, policy) = setup();

    submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("first submission should succeed");

    let outcome = submit_product(
        &submission(2, "Samsung Galaxy S21", Some("Samsung"), category, 650.0),
        &policy,
        &repo,
    )
    .expect("second submission should succeed");

    assert!(outcome.resolution.created);
}

#[test]
fn typeahead_query_returns_ranked_suggestions_with_context() {
    let (_db, repo, category, policy) = setup();

    // Seed the catalog directly so close storage variants stay separate
    // entries, then attach one offer to each through the submission path.
    for (vendor, name, brand, price) in [
        (1, "iPhone 13 128GB", "Apple", 799.0),
        (2, "iPhone 13 256GB", "Apple", 899.0),
        (3, "Washing Machine X200", "Bosch", 450.0),
    ] {
        let item = repo
            .create_catalog_item(
                &new_catalog_item(name, Some(brand), category),
                &extract_keywords(name, Some(brand)),
            )
            .expect("seed item should be created");
        let mut sub = submission(vendor, name, Some(brand), category, price);
        sub.catalog_id = Some(item.id);
        submit_product(&sub, &policy, &repo).expect("seed offer should succeed");
    }

    let params = SuggestQueryParams {
        query: "iphone".into(),
        brand: None,
        category_id: None,
    };
    let suggestions = suggest_catalog_matches(&params, &repo).expect("suggest should succeed");

    assert_eq!(suggestions.len(), 2);
    for suggestion in &suggestions {
        assert!(suggestion.confidence_score >= 0.7);
        assert_eq!(suggestion.category_name.as_deref(), Some("Electronics"));
        assert_eq!(suggestion.vendor_count, 1);
        assert!(suggestion.best_price.is_some());
        assert!(!suggestion.match_reasons.is_empty());
    }
    // Equal confidence resolves on the cheaper item first.
    assert!(suggestions[0].best_price <= suggestions[1].best_price);
}

#[test]
fn unrelated_query_yields_no_suggestions() {
    let (_db, repo, category, policy) = setup();

    submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("seed submission should succeed");

    let params = SuggestQueryParams {
        query: "garden hose".into(),
        brand: None,
        category_id: None,
    };
    let suggestions = suggest_catalog_matches(&params, &repo).expect("suggest should succeed");
    assert!(suggestions.is_empty());
}

#[test]
fn feedback_round_trip_against_real_storage() {
    let (_db, repo, category, policy) = setup();

    let outcome = submit_product(
        &submission(1, "iPhone 13 128GB", Some("Apple"), category, 799.0),
        &policy,
        &repo,
    )
    .expect("seed submission should succeed");

    let record = NewFeedbackRecord {
        query_text: NonEmptyString::new("iphone 13").expect("valid query"),
        suggested_catalog_id: outcome.resolution.catalog_id,
        accepted: true,
        chosen_catalog_id: Some(outcome.resolution.catalog_id),
        confidence_at_time: Some(ConfidenceScore::clamped(0.88)),
        created_at: Utc::now().naive_utc(),
    };
    record_feedback(&record, &repo).expect("feedback should be recorded");

    let page = agora_market::services::feedback::list_feedback(1, &repo)
        .expect("should list feedback");
    assert_eq!(page.items.len(), 1);
    assert_eq!(
        page.items[0].suggested_catalog_id,
        outcome.resolution.catalog_id
    );
}
