//! Type-ahead suggestions drawn from record names.

use crate::types::Searchable;
use ahash::AHashSet;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Generates up to [`MAX_SUGGESTIONS`] unique completions for a partial query.
///
/// For each record in order, its name is offered if it contains the query, then
/// every word of the name that starts with the query and is longer than it.
/// Matching is case-insensitive; suggestions keep the record's casing.
pub fn generate_suggestions<R: Searchable>(query: &str, records: &[R]) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = AHashSet::new();
    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);

    for record in records {
        let name = record.name();
        if name.to_lowercase().contains(&needle) {
            offer(name, &mut seen, &mut suggestions);
        }

        for word in name.split_whitespace() {
            let lowered = word.to_lowercase();
            if lowered.starts_with(&needle) && lowered.len() > needle.len() {
                offer(word, &mut seen, &mut suggestions);
            }
        }

        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
    }

    suggestions
}

fn offer(candidate: &str, seen: &mut AHashSet<String>, suggestions: &mut Vec<String>) {
    if suggestions.len() < MAX_SUGGESTIONS && seen.insert(candidate.to_string()) {
        suggestions.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use assert2::check;

    fn products(names: &[&str]) -> Vec<Product> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Product {
                id: format!("p{}", i),
                name: (*name).to_string(),
                slug: None,
                description: None,
                category_id: None,
                price: 1.0,
                inventory_count: 1,
                rating: None,
            })
            .collect()
    }

    #[test]
    fn test_names_then_words_in_insertion_order() {
        let records = products(&["Wireless Headphones", "Desk Lamp", "Wired Mouse"]);
        check!(
            generate_suggestions("wir", &records)
                == vec!["Wireless Headphones", "Wireless", "Wired Mouse", "Wired"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let records = products(&["Lamp", "Lamp", "Lamp Shade"]);
        check!(generate_suggestions("lam", &records) == vec!["Lamp", "Lamp Shade"]);
    }

    #[test]
    fn test_word_equal_to_query_is_not_a_completion() {
        let records = products(&["Big Lamp"]);
        // The name contains "lamp", but the word "Lamp" is not longer than the query
        check!(generate_suggestions("lamp", &records) == vec!["Big Lamp"]);
    }

    #[test]
    fn test_truncates_to_five() {
        let records = products(&[
            "Cable A1", "Cable B2", "Cable C3", "Cable D4", "Cable E5", "Cable F6",
        ]);
        let suggestions = generate_suggestions("cab", &records);
        check!(suggestions.len() == MAX_SUGGESTIONS);
        check!(suggestions[0] == "Cable A1");
        check!(suggestions[1] == "Cable");
    }

    #[test]
    fn test_blank_query_suggests_nothing() {
        let records = products(&["Lamp"]);
        check!(generate_suggestions("  ", &records).is_empty());
    }
}
