//! Catalog search tool: local fuzzy search, or a pass-through to the backend.

use crate::search::{build_search_url, highlight_search_terms, search_results_text};
use crate::state::CatalogState;
use crate::types::{PriceRange, Product, SearchFilters, SortBy};
use rmcp::schemars;
use serde::Deserialize;
use std::{fmt::Write as _, sync::Arc};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Free-text query, e.g. "wireless headphones"
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
    /// Minimum rating; unrated products count as 0
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// One of: relevance, price_asc, price_desc, name, rating, newest
    #[serde(default)]
    pub sort: Option<String>,
    /// Maximum number of results to return (default from config)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of results to skip
    #[serde(default)]
    pub offset: Option<usize>,
    /// Query the storefront backend instead of the local catalog
    #[serde(default)]
    pub remote: bool,
}

impl SearchRequest {
    /// Convert the loose tool parameters into validated filters.
    pub fn filters(&self) -> Result<SearchFilters, String> {
        let sort_by = self
            .sort
            .as_deref()
            .map(str::parse::<SortBy>)
            .transpose()
            .map_err(|e| {
                format!(
                    "{}. Valid sorts: {}",
                    e,
                    SortBy::ALL.map(SortBy::as_str).join(", ")
                )
            })?;

        let price_range = match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => {
                return Err(format!("min_price {} is above max_price {}", min, max));
            }
            (Some(min), Some(max)) => Some(PriceRange::new(min, max)),
            _ => None,
        };

        Ok(SearchFilters {
            categories: self.categories.clone().unwrap_or_default(),
            price_range,
            in_stock: self.in_stock.unwrap_or(false),
            rating: self.min_rating,
            sort_by,
        })
    }
}

/// A result line ready for rendering.
struct Hit<'a> {
    product: &'a Product,
    score: Option<f64>,
}

/// Execute a catalog search and render it as text.
pub async fn handle_search(
    state: &Arc<CatalogState>,
    request: SearchRequest,
) -> Result<String, String> {
    let filters = request.filters()?;
    let limit = request.limit.unwrap_or(state.config().default_limit);
    let offset = request.offset.unwrap_or(0);

    if request.remote {
        let client = state.client();
        let response = client
            .search(&request.query, &filters, limit, offset)
            .await;
        // Analytics is best-effort; the handle is dropped on purpose
        drop(client.track_search(&request.query, response.total, &filters));

        let hits: Vec<_> = response
            .results
            .iter()
            .map(|product| Hit {
                product,
                score: None,
            })
            .collect();
        return Ok(format_search_results(
            &hits,
            usize::try_from(response.total).unwrap_or(usize::MAX),
            &request.query,
            &filters,
            &response.suggestions,
        ));
    }

    let catalog = state.catalog();
    let page = state.with_search(|search| {
        catalog.search(search, &request.query, &filters, limit, offset)
    });

    let suggestions = if page.total == 0 {
        catalog.suggestions(&request.query)
    } else {
        Vec::new()
    };

    let hits: Vec<_> = page
        .results
        .iter()
        .map(|r| Hit {
            product: r.record,
            score: Some(r.relevance_score),
        })
        .collect();

    Ok(format_search_results(
        &hits,
        page.total,
        &request.query,
        &filters,
        &suggestions,
    ))
}

/// Format search results into a readable string output.
fn format_search_results(
    hits: &[Hit<'_>],
    total: usize,
    query: &str,
    filters: &SearchFilters,
    suggestions: &[String],
) -> String {
    let mut output = format!("{}\n", search_results_text(total, query));
    let _ = writeln!(output, "Link: {}\n", build_search_url(query, filters));

    let max_score = hits
        .iter()
        .filter_map(|h| h.score)
        .fold(0.0_f64, f64::max);

    for (idx, hit) in hits.iter().enumerate() {
        let product = hit.product;
        let _ = write!(
            output,
            "{}. {} [{}] - ${:.2}",
            idx + 1,
            highlight_search_terms(&product.name, query),
            product.id,
            product.price
        );

        if product.inventory_count <= 0 {
            output.push_str(" (out of stock)");
        }
        if let Some(rating) = product.rating {
            let _ = write!(output, " - rating {:.1}", rating);
        }
        if let Some(score) = hit.score
            && max_score > 0.0
        {
            let relevance = ((score / max_score) * 100.0).round();
            let _ = write!(output, " - relevance: {}%", relevance);
        }
        output.push('\n');

        if let Some(first_line) = product
            .description
            .as_deref()
            .and_then(|d| d.lines().find(|line| !line.trim().is_empty()))
        {
            let _ = writeln!(output, "   {}", first_line.trim());
        }
    }

    if !suggestions.is_empty() {
        let _ = writeln!(output, "\nDid you mean: {}", suggestions.join(", "));
    }

    output
}
