//! Structured filtering and sorting of scored results.

use crate::types::{SearchFilters, SearchResult, Searchable, SortBy};
use std::cmp::Ordering;

/// Narrows `results` by `filters` and orders them by the requested strategy.
///
/// Filters run in a fixed order: category, price range, in-stock, rating. Each
/// is skipped when unset. The input is consumed and a new vector is returned;
/// the records themselves are never touched.
pub fn apply_filters<R: Searchable>(
    results: Vec<SearchResult<R>>,
    filters: &SearchFilters,
) -> Vec<SearchResult<R>> {
    let before = results.len();

    let mut filtered: Vec<_> = results
        .into_iter()
        .filter(|r| matches_category(&r.record, &filters.categories))
        .filter(|r| {
            filters
                .price_range
                .is_none_or(|range| range.contains(r.record.price()))
        })
        .filter(|r| !filters.in_stock || r.record.inventory_count() > 0)
        .filter(|r| {
            filters
                .rating
                .is_none_or(|min| r.record.rating().unwrap_or(0.0) >= min)
        })
        .collect();

    sort_results(&mut filtered, filters.sort_by.unwrap_or_default());

    tracing::trace!("Filters kept {} of {} results", filtered.len(), before);
    filtered
}

fn matches_category<R: Searchable>(record: &R, categories: &[String]) -> bool {
    categories.is_empty()
        || record
            .category_id()
            .is_some_and(|id| categories.iter().any(|c| c == id))
}

/// Sorts results in place. Ties may come back in any order.
pub fn sort_results<R: Searchable>(results: &mut [SearchResult<R>], sort_by: SortBy) {
    match sort_by {
        SortBy::PriceAsc => {
            results.sort_unstable_by(|a, b| a.record.price().total_cmp(&b.record.price()));
        }
        SortBy::PriceDesc => {
            results.sort_unstable_by(|a, b| b.record.price().total_cmp(&a.record.price()));
        }
        SortBy::Name => {
            results.sort_unstable_by(|a, b| compare_names(a.record.name(), b.record.name()));
        }
        SortBy::Rating => results.sort_unstable_by(|a, b| {
            let a = a.record.rating().unwrap_or(0.0);
            let b = b.record.rating().unwrap_or(0.0);
            b.total_cmp(&a)
        }),
        // Relies on ids growing over time; there is no timestamp on records.
        SortBy::Newest => results.sort_unstable_by(|a, b| b.record.id().cmp(a.record.id())),
        SortBy::Relevance => {
            results.sort_unstable_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        }
    }
}

/// Human ordering for names: case-insensitive first, raw bytes as tiebreak.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
