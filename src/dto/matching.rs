use serde::Serialize;

use crate::domain::catalog::CatalogItem;
use crate::domain::category::Category;
use crate::domain::offer::OfferSummary;
use crate::matching::policy::ScoredCandidate;

/// One catalog suggestion as returned by the typeahead endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchSuggestionDto {
    pub catalog_id: i32,
    pub name: String,
    pub brand: Option<String>,
    pub category_name: Option<String>,
    pub confidence_score: f64,
    pub match_reasons: Vec<String>,
    /// Lowest active offer price, absent when nobody sells the item yet.
    pub best_price: Option<f64>,
    /// Number of distinct vendors with an active offer.
    pub vendor_count: usize,
}

impl MatchSuggestionDto {
    /// Assembles a suggestion row from the scored candidate and its
    /// marketplace context.
    pub fn new(
        candidate: &ScoredCandidate,
        item: &CatalogItem,
        category: Option<&Category>,
        offers: &[OfferSummary],
    ) -> Self {
        let best_price = offers
            .iter()
            .map(|o| o.price.get())
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut vendors: Vec<i32> = offers.iter().map(|o| o.vendor_id.get()).collect();
        vendors.sort_unstable();
        vendors.dedup();

        Self {
            catalog_id: item.id.get(),
            name: item.name.as_str().to_string(),
            brand: item.brand.as_ref().map(|b| b.as_str().to_string()),
            category_name: category.map(|c| c.name.as_str().to_string()),
            confidence_score: candidate.score.confidence.get(),
            match_reasons: candidate
                .score
                .reasons
                .iter()
                .map(|r| r.to_string())
                .collect(),
            best_price,
            vendor_count: vendors.len(),
        }
    }
}

/// Response body for a processed product submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitOutcomeDto {
    pub catalog_id: i32,
    /// True when the submission created a new catalog entry rather than
    /// linking to an existing one.
    pub catalog_created: bool,
    pub offer_id: i32,
    pub sku: String,
}
