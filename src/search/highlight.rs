//! Display helpers for search result pages.

use regex::{Regex, RegexBuilder};

/// Summary line for a result count, e.g. `3 results for "lamp"`.
pub fn search_results_text(count: usize, query: &str) -> String {
    match count {
        0 => format!("No results found for \"{}\"", query),
        1 => format!("1 result for \"{}\"", query),
        n => format!("{} results for \"{}\"", n, query),
    }
}

/// Wraps every case-insensitive occurrence of a query word in `<mark>` tags.
///
/// Query words shorter than two characters are ignored. The matched text keeps
/// its original casing. Longer words win where two words overlap.
pub fn highlight_search_terms(text: &str, query: &str) -> String {
    match highlight_pattern(query) {
        Some(pattern) => pattern.replace_all(text, "<mark>$0</mark>").into_owned(),
        None => text.to_string(),
    }
}

fn highlight_pattern(query: &str) -> Option<Regex> {
    let mut terms: Vec<&str> = query
        .split_whitespace()
        .filter(|term| term.chars().count() > 1)
        .collect();
    if terms.is_empty() {
        return None;
    }

    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .inspect_err(|e| tracing::warn!("Failed to build highlight pattern: {}", e))
        .ok()
}
