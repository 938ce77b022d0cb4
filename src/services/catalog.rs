use std::collections::BTreeMap;

use crate::domain::catalog::{CatalogItem, NewCatalogItem};
use crate::domain::category::Category;
use crate::domain::offer::ProductSubmission;
use crate::domain::types::{CatalogId, CategoryId, Slug, UserId};
use crate::dto::matching::MatchSuggestionDto;
use crate::matching::keywords::extract_keywords;
use crate::matching::policy::{MatchDecision, MatchMode, ScoredCandidate, decide};
use crate::matching::scoring::score_candidate;
use crate::repository::{CatalogReader, CatalogWriter, CategoryReader, OfferReader};

use super::{ServiceError, ServiceResult};

/// Cap on the candidate pool handed to the scorer per matching run.
pub const MAX_CANDIDATES: usize = 25;

/// Query parameters accepted by the suggestion endpoint.
#[derive(Debug, Clone, Default)]
pub struct SuggestQueryParams {
    pub query: String,
    pub brand: Option<String>,
    pub category_id: Option<i32>,
}

/// Outcome of resolving a submission against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogResolution {
    pub catalog_id: CatalogId,
    /// True when a new catalog entry was created for this submission.
    pub created: bool,
}

/// Retrieves and scores catalog candidates for a query name and brand.
///
/// Candidate retrieval goes through the keyword index: items sharing at least
/// one indexed token are pooled, ranked by accumulated index weight, and the
/// pool is capped at [`MAX_CANDIDATES`] before the scorer runs. A name that
/// yields no indexable tokens produces no candidates.
pub fn find_scored_candidates<R>(
    name: &str,
    brand: Option<&str>,
    category_id: Option<CategoryId>,
    repo: &R,
) -> ServiceResult<Vec<ScoredCandidate>>
where
    R: CatalogReader,
{
    let tokens: Vec<String> = extract_keywords(name, brand)
        .into_iter()
        .map(|k| k.keyword)
        .collect();
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let entries = match repo.query_keyword_index(&tokens, category_id) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Failed to query keyword index: {e}");
            return Err(ServiceError::Storage);
        }
    };

    let mut weights: BTreeMap<CatalogId, i64> = BTreeMap::new();
    for entry in entries {
        *weights.entry(entry.catalog_id).or_insert(0) += i64::from(entry.weight);
    }

    let mut pooled: Vec<(CatalogId, i64)> = weights.into_iter().collect();
    pooled.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pooled.truncate(MAX_CANDIDATES);
    let ids: Vec<CatalogId> = pooled.into_iter().map(|(id, _)| id).collect();

    let items = match repo.get_catalog_items_by_ids(&ids) {
        Ok(items) => items,
        Err(e) => {
            log::error!("Failed to fetch candidate catalog items: {e}");
            return Err(ServiceError::Storage);
        }
    };

    let candidates = items
        .iter()
        .map(|item| ScoredCandidate {
            catalog_id: item.id,
            score: score_candidate(
                name,
                brand,
                item.name.as_str(),
                item.brand.as_ref().map(|b| b.as_str()),
            ),
        })
        .collect();

    Ok(candidates)
}

/// Core business logic behind the catalog typeahead.
///
/// Runs retrieval and scoring in suggest mode and enriches the surviving
/// candidates with category and offer context. Returns an empty list whenever
/// nothing clears the suggestion threshold, including for unmatchable queries.
pub fn suggest_catalog_matches<R>(
    params: &SuggestQueryParams,
    repo: &R,
) -> ServiceResult<Vec<MatchSuggestionDto>>
where
    R: CatalogReader + CategoryReader + OfferReader,
{
    let query = params.query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let category_id = match params.category_id {
        Some(raw) => match CategoryId::new(raw) {
            Ok(id) => Some(id),
            Err(e) => return Err(ServiceError::InvalidInput(e.to_string())),
        },
        None => None,
    };

    let candidates = find_scored_candidates(query, params.brand.as_deref(), category_id, repo)?;
    let ranked = match decide(candidates, MatchMode::Suggest) {
        MatchDecision::Suggest(ranked) => ranked,
        _ => return Ok(Vec::new()),
    };

    let ids: Vec<CatalogId> = ranked.iter().map(|c| c.catalog_id).collect();
    let items = match repo.get_catalog_items_by_ids(&ids) {
        Ok(items) => items,
        Err(e) => {
            log::error!("Failed to fetch suggested catalog items: {e}");
            return Err(ServiceError::Storage);
        }
    };
    let items: BTreeMap<CatalogId, CatalogItem> =
        items.into_iter().map(|item| (item.id, item)).collect();

    let mut categories: BTreeMap<CategoryId, Category> = BTreeMap::new();
    let mut suggestions = Vec::with_capacity(ranked.len());

    for candidate in &ranked {
        let Some(item) = items.get(&candidate.catalog_id) else {
            continue;
        };

        if let std::collections::btree_map::Entry::Vacant(entry) =
            categories.entry(item.category_id)
        {
            match repo.get_category_by_id(item.category_id) {
                Ok(Some(category)) => {
                    entry.insert(category);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Failed to fetch category: {e}");
                    return Err(ServiceError::Storage);
                }
            }
        }

        let offers = match repo.list_active_offer_summaries(item.id) {
            Ok(offers) => offers,
            Err(e) => {
                log::error!("Failed to fetch offer summaries: {e}");
                return Err(ServiceError::Storage);
            }
        };

        suggestions.push(MatchSuggestionDto::new(
            candidate,
            item,
            categories.get(&item.category_id),
            &offers,
        ));
    }

    // Display order: strongest match first, then the cheapest item, items
    // without any offer last within a confidence band.
    suggestions.sort_by(|a, b| {
        b.confidence_score
            .partial_cmp(&a.confidence_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| match (a.best_price, b.best_price) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.catalog_id.cmp(&b.catalog_id))
    });

    Ok(suggestions)
}

/// Resolves a vendor submission to a catalog item, creating one if needed.
///
/// Runs retrieval and scoring in auto-link mode: a candidate at or above the
/// auto-link threshold is linked without confirmation, anything weaker falls
/// through to creating a fresh catalog entry. A unique-constraint conflict on
/// creation means another writer beat us to the same (name, category) pair, so
/// the freshly created row is looked up and linked instead.
pub fn resolve_catalog_item<R>(
    submission: &ProductSubmission,
    repo: &R,
) -> ServiceResult<CatalogResolution>
where
    R: CatalogReader + CatalogWriter,
{
    let candidates = find_scored_candidates(
        submission.name.as_str(),
        submission.brand.as_ref().map(|b| b.as_str()),
        Some(submission.category_id),
        repo,
    )?;

    if let MatchDecision::AutoLink(catalog_id) = decide(candidates, MatchMode::AutoLink) {
        return Ok(CatalogResolution {
            catalog_id,
            created: false,
        });
    }

    let slug = match Slug::from_name(submission.name.as_str()) {
        Ok(slug) => slug,
        Err(e) => return Err(ServiceError::InvalidInput(e.to_string())),
    };

    // The submitting vendor account is recorded as the creator.
    let created_by = match UserId::new(submission.vendor_id.get()) {
        Ok(user_id) => user_id,
        Err(e) => {
            log::error!("Invalid vendor id in submission: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let keywords = extract_keywords(
        submission.name.as_str(),
        submission.brand.as_ref().map(|b| b.as_str()),
    );

    let now = chrono::Utc::now().naive_utc();
    let new_item = NewCatalogItem {
        name: submission.name.clone(),
        brand: submission.brand.clone(),
        model: submission.model.clone(),
        category_id: submission.category_id,
        base_description: submission.description.clone(),
        specifications: submission.other_variants.clone(),
        images: submission.images.clone(),
        slug,
        is_active: true,
        created_by,
        created_at: now,
        updated_at: now,
    };

    match repo.create_catalog_item(&new_item, &keywords) {
        Ok(item) => Ok(CatalogResolution {
            catalog_id: item.id,
            created: true,
        }),
        Err(e) if e.is_unique_violation() => {
            match repo.find_catalog_item_by_name(&submission.name, submission.category_id) {
                Ok(Some(existing)) => Ok(CatalogResolution {
                    catalog_id: existing.id,
                    created: false,
                }),
                Ok(None) => {
                    log::error!("Unique conflict on catalog creation but no row found");
                    Err(ServiceError::Internal)
                }
                Err(e) => {
                    log::error!("Failed to re-fetch conflicting catalog item: {e}");
                    Err(ServiceError::Storage)
                }
            }
        }
        Err(e) => {
            log::error!("Failed to create catalog item: {e}");
            Err(ServiceError::Storage)
        }
    }
}
