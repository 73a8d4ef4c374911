//! Conversion between search parameters and storefront `/search` URLs.

use crate::search::{build_search_url, parse_search_url};
use crate::types::SearchFilters;
use rmcp::schemars;
use serde::Deserialize;
use serde_json::json;

use super::search::SearchRequest;

/// Query and filters to encode; paging and backend options do not apply to URLs.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct BuildSearchUrlRequest {
    /// Free-text query, e.g. "wireless headphones"
    #[serde(default)]
    pub query: String,
    /// Only products in these category ids
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Lower price bound (inclusive); needs max_price too
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Upper price bound (inclusive); needs min_price too
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Only products with inventory
    #[serde(default)]
    pub in_stock: Option<bool>,
    /// Minimum rating
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// One of: relevance, price_asc, price_desc, name, rating, newest
    #[serde(default)]
    pub sort: Option<String>,
}

impl BuildSearchUrlRequest {
    fn filters(&self) -> Result<SearchFilters, String> {
        SearchRequest {
            query: self.query.clone(),
            categories: self.categories.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock,
            min_rating: self.min_rating,
            sort: self.sort.clone(),
            ..SearchRequest::default()
        }
        .filters()
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseSearchUrlRequest {
    /// A `/search?...` path or absolute storefront URL
    pub url: String,
}

/// Build a shareable `/search?...` path from search parameters.
pub fn handle_build_search_url(request: &BuildSearchUrlRequest) -> Result<String, String> {
    let filters = request.filters()?;
    Ok(build_search_url(&request.query, &filters))
}

/// Parse a storefront search URL into its query and filters, rendered as JSON.
pub fn handle_parse_search_url(request: &ParseSearchUrlRequest) -> Result<String, String> {
    let parsed = parse_search_url(&request.url).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&json!({
        "query": parsed.query,
        "filters": parsed.filters,
    }))
    .map_err(|e| format!("Failed to render parsed search: {}", e))
}
