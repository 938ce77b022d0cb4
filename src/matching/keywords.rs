//! Keyword extraction for the inverted catalog index.
//!
//! The same extraction is used to index new catalog entries and to tokenize
//! incoming queries, so both sides of a lookup agree on token shape. Tokens
//! are matched literally: no stemming, no synonym expansion.

use serde::{Deserialize, Serialize};

/// Maximum number of keywords indexed per catalog item.
pub const MAX_KEYWORDS: usize = 10;

/// Tokens shorter than this are treated as stopword-like and dropped.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Index weight for the token equal to the item brand.
pub const BRAND_KEYWORD_WEIGHT: i32 = 3;

/// Index weight for every other token.
pub const DEFAULT_KEYWORD_WEIGHT: i32 = 1;

/// A single extracted token together with its index weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightedKeyword {
    pub keyword: String,
    pub weight: i32,
}

/// Splits a product name into lowercased tokens.
///
/// Every character outside `[a-z0-9]` acts as a separator; tokens of length
/// < [`MIN_KEYWORD_LEN`] are dropped. Token order follows the original name
/// and natural repetitions are kept.
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() >= MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

/// Derives the weighted keyword list for a product name.
///
/// Takes the first [`MAX_KEYWORDS`] tokens in original order. A token equal to
/// the lowercased brand is weighted [`BRAND_KEYWORD_WEIGHT`]; everything else
/// gets [`DEFAULT_KEYWORD_WEIGHT`]. An empty or whitespace-only name yields an
/// empty list, which callers must treat as "cannot index / cannot match".
pub fn extract_keywords(name: &str, brand: Option<&str>) -> Vec<WeightedKeyword> {
    let brand = brand.map(str::to_lowercase);

    tokenize(name)
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|keyword| {
            let weight = match &brand {
                Some(brand) if *brand == keyword => BRAND_KEYWORD_WEIGHT,
                _ => DEFAULT_KEYWORD_WEIGHT,
            };
            WeightedKeyword { keyword, weight }
        })
        .collect()
}
