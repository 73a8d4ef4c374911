//! Search relevance and ranking algorithms.
//!
//! Scores are additive heuristics over query terms and record fields, not
//! probabilities. See [`calculate_relevance`] for the exact weights.

use super::tokenize::field_tokens;
use crate::types::Searchable;
use rapidfuzz::distance::levenshtein;

/// Bonus when the whole field text contains the term.
const FIELD_SUBSTRING_SCORE: f64 = 10.0;
/// Field token equals the term.
const EXACT_TOKEN_SCORE: f64 = 8.0;
/// Field token starts with the term.
const PREFIX_TOKEN_SCORE: f64 = 5.0;
/// Field token contains the term.
const SUBSTRING_TOKEN_SCORE: f64 = 3.0;
/// Field token is within [`MAX_FUZZY_DISTANCE`] edits of the term.
const FUZZY_TOKEN_SCORE: f64 = 2.0;
/// Largest edit distance still counted as a fuzzy match.
pub(crate) const MAX_FUZZY_DISTANCE: usize = 2;
/// Multiplier for fields whose name contains "name" or "title".
const TITLE_FIELD_BOOST: f64 = 1.5;

/// Levenshtein distance between two strings, counted in Unicode scalar values.
///
/// Insertions, deletions and substitutions each cost 1. Case-sensitive: callers
/// lower-case both sides first.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Score a single field token against a single query term.
///
/// Only the best matching tier counts:
/// - 8: Exact match
/// - 5: Token starts with term
/// - 3: Token contains term
/// - 2: Within two edits
/// - 0: No match
fn token_score(token: &str, term: &str) -> f64 {
    if token == term {
        EXACT_TOKEN_SCORE
    } else if token.starts_with(term) {
        PREFIX_TOKEN_SCORE
    } else if token.contains(term) {
        SUBSTRING_TOKEN_SCORE
    } else if edit_distance(token, term) <= MAX_FUZZY_DISTANCE {
        FUZZY_TOKEN_SCORE
    } else {
        0.0
    }
}

/// Returns true if matches in this field should be boosted.
fn is_title_field(field: &str) -> bool {
    let field = field.to_ascii_lowercase();
    field.contains("name") || field.contains("title")
}

/// Score one field's text against every query term, before any field boost.
pub(crate) fn field_score(text: &str, terms: &[String]) -> f64 {
    let lowered = text.to_lowercase();
    let tokens = field_tokens(&lowered);

    terms
        .iter()
        .map(|term| {
            let whole_field = if lowered.contains(term.as_str()) {
                FIELD_SUBSTRING_SCORE
            } else {
                0.0
            };
            whole_field
                + tokens
                    .iter()
                    .map(|token| token_score(token, term))
                    .sum::<f64>()
        })
        .sum()
}

/// Calculate the relevance of a record for already-tokenized query terms.
///
/// For every searched field and every term, the field earns +10 if its text
/// contains the term, plus the [`token_score`] of each of its own tokens.
/// Name and title fields are worth 1.5x. Fields the record lacks score 0.
pub fn calculate_relevance<R: Searchable + ?Sized>(
    record: &R,
    terms: &[String],
    fields: &[&str],
) -> f64 {
    fields
        .iter()
        .filter_map(|field| record.text_field(field).map(|text| (field, text)))
        .map(|(field, text)| {
            let subtotal = field_score(text, terms);
            if is_title_field(field) {
                subtotal * TITLE_FIELD_BOOST
            } else {
                subtotal
            }
        })
        .sum()
}
