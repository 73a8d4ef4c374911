//! Fuzzy full-text matching over in-memory records.

use super::{scoring::calculate_relevance, tokenize::tokenize};
use crate::types::{SearchResult, Searchable};

/// Fields searched when the caller does not name any.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "description"];

/// Scores every record against `query` and returns the matches, best first.
///
/// A blank query matches everything: all records come back in input order with a
/// score of 0. Otherwise records scoring 0 are dropped. Equal scores may come back
/// in any order.
pub fn fuzzy_search<'a, R: Searchable>(
    records: &'a [R],
    query: &str,
    fields: &[&str],
) -> Vec<SearchResult<&'a R>> {
    if query.trim().is_empty() {
        return records
            .iter()
            .map(|record| SearchResult::new(record, 0.0))
            .collect();
    }

    let terms = tokenize(query);
    tracing::trace!("Fuzzy search for {:?} over {} records", terms, records.len());

    let mut results: Vec<_> = records
        .iter()
        .filter_map(|record| {
            let score = calculate_relevance(record, &terms, fields);
            (score > 0.0).then(|| SearchResult::new(record, score))
        })
        .collect();

    results.sort_unstable_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

    tracing::debug!(
        "Fuzzy search for '{}' matched {} of {} records",
        query,
        results.len(),
        records.len()
    );

    results
}
