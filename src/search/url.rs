//! Serialization of search state to and from storefront `/search` URLs.
//!
//! Parameters: `q`, `categories` (comma separated), `minPrice` + `maxPrice`,
//! `inStock=true`, `rating`, `sort`.

use crate::error::SearchError;
use crate::types::{PriceRange, SearchFilters, SortBy};
use reqwest::Url;
use std::collections::HashMap;

/// Path of the storefront search page.
pub const SEARCH_PATH: &str = "/search";

/// Origin used to resolve relative URLs; never appears in output.
const PLACEHOLDER_ORIGIN: &str = "http://storefront.invalid";

/// Query and filters recovered from a search URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSearch {
    pub query: String,
    pub filters: SearchFilters,
}

/// Builds a `/search?...` path for the given query and filters.
///
/// Unset filters are left out, as is an empty query. The price range is written
/// as a `minPrice`/`maxPrice` pair.
pub fn build_search_url(query: &str, filters: &SearchFilters) -> String {
    let mut url = Url::parse(PLACEHOLDER_ORIGIN)
        .expect("placeholder origin is a valid url")
        .join(SEARCH_PATH)
        .expect("search path is a valid relative url");

    {
        let mut params = url.query_pairs_mut();
        if !query.is_empty() {
            params.append_pair("q", query);
        }
        if !filters.categories.is_empty() {
            params.append_pair("categories", &filters.categories.join(","));
        }
        if let Some(range) = filters.price_range {
            params.append_pair("minPrice", &range.min.to_string());
            params.append_pair("maxPrice", &range.max.to_string());
        }
        if filters.in_stock {
            params.append_pair("inStock", "true");
        }
        if let Some(rating) = filters.rating {
            params.append_pair("rating", &rating.to_string());
        }
        if let Some(sort) = filters.sort_by {
            params.append_pair("sort", sort.as_str());
        }
    }

    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    }
}

/// Parses a search URL back into a query and filters.
///
/// Accepts either a path (`/search?q=lamp`) or an absolute URL. Missing parameters
/// fall back to defaults; a price range needs both bounds. Unknown `sort` values and
/// non-numeric `rating`, `minPrice` or `maxPrice` are rejected.
pub fn parse_search_url(input: &str) -> Result<ParsedSearch, SearchError> {
    let invalid = |reason: String| SearchError::InvalidUrl {
        url: input.to_string(),
        reason,
    };

    let base = Url::parse(PLACEHOLDER_ORIGIN).map_err(|e| invalid(e.to_string()))?;
    let url = Url::options()
        .base_url(Some(&base))
        .parse(input)
        .map_err(|e| invalid(e.to_string()))?;

    // First occurrence wins, like URLSearchParams::get
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    let query = params.remove("q").unwrap_or_default();

    let categories = params
        .get("categories")
        .map(|csv| {
            csv.split(',')
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let min_price = parse_number(&params, "minPrice")?;
    let max_price = parse_number(&params, "maxPrice")?;
    let price_range = match (min_price, max_price) {
        (Some(min), Some(max)) => Some(PriceRange::new(min, max)),
        _ => None,
    };

    let sort_by = params
        .get("sort")
        .map(|sort| sort.parse::<SortBy>())
        .transpose()?;

    let filters = SearchFilters {
        categories,
        price_range,
        in_stock: params.get("inStock").is_some_and(|v| v == "true"),
        rating: parse_number(&params, "rating")?,
        sort_by,
    };

    Ok(ParsedSearch { query, filters })
}

fn parse_number(
    params: &HashMap<String, String>,
    key: &'static str,
) -> Result<Option<f64>, SearchError> {
    params
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| SearchError::invalid_filter(key, raw.as_str()))
        })
        .transpose()
}
