//! Search filters and their query-string normalization.
//!
//! List filters drop empty entries and disappear entirely when nothing is
//! left, because the backend reads an explicit empty filter as "match
//! nothing". `favoriteIds` is the exception: it is always sent, even empty.

use serde::Serialize;
use serde_json::Number;

use crate::error::ApiError;

/// Price bounds, sent as one JSON-encoded `prices` parameter.
///
/// Bounds are JSON numbers so fractional prices go out as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

/// Result ordering understood by `/v1/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSort {
    PriceAsc,
    PriceDesc,
    Newest,
    Other(String),
}

impl SearchSort {
    pub fn as_str(&self) -> &str {
        match self {
            SearchSort::PriceAsc => "price_asc",
            SearchSort::PriceDesc => "price_desc",
            SearchSort::Newest => "newest",
            SearchSort::Other(value) => value,
        }
    }
}

/// Filters for the search operation. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub gender: Vec<String>,
    pub poultry_type: Vec<String>,
    pub tail: Vec<String>,
    pub dewlap: Vec<String>,
    pub crest: Vec<String>,
    pub gender_category: Vec<String>,
    pub favorite_ids: Vec<String>,
    pub keyword: Option<String>,
    pub prices: Option<PriceRange>,
    pub sort: Option<SearchSort>,
    /// Zero-based page; `None` means the first page.
    pub page: Option<u32>,
}

impl SearchParams {
    /// Serialize into ordered query pairs.
    pub fn to_query(&self) -> Result<Vec<(String, String)>, ApiError> {
        let mut query = Vec::new();
        let mut push = |name: &str, value: String| query.push((name.to_string(), value));

        for (name, list) in [
            ("gender", &self.gender),
            ("type", &self.poultry_type),
            ("tail", &self.tail),
            ("dewlap", &self.dewlap),
            ("crest", &self.crest),
        ] {
            if let Some(joined) = join_non_empty(list) {
                push(name, joined);
            }
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            push("keyword", keyword.to_string());
        }
        if let Some(joined) = join_non_empty(&self.gender_category) {
            push("genderCategory", joined);
        }
        if let Some(prices) = &self.prices {
            let encoded =
                serde_json::to_string(prices).map_err(|e| ApiError::Serialization(e.to_string()))?;
            push("prices", encoded);
        }
        if let Some(sort) = &self.sort {
            push("sort", sort.as_str().to_string());
        }
        push("favoriteIds", self.favorite_ids.join(","));
        push("page", self.page.unwrap_or(0).to_string());

        Ok(query)
    }
}

fn join_non_empty(list: &[String]) -> Option<String> {
    let kept: Vec<&str> = list
        .iter()
        .map(String::as_str)
        .filter(|entry| !entry.is_empty())
        .collect();
    (!kept.is_empty()).then(|| kept.join(","))
}
