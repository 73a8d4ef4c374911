mod common;

use assert2::check;
use common::catalog;
use rstest::rstest;
use storefront_search::search::{
    DEFAULT_SEARCH_FIELDS, apply_filters, build_search_url, calculate_relevance, fuzzy_search,
    generate_suggestions, highlight_search_terms, parse_search_url, search_results_text,
    tokenize,
};
use storefront_search::{CatalogSearch, PriceRange, Product, SearchFilters, SortBy};

fn ids(results: &[storefront_search::SearchResult<&Product>]) -> Vec<String> {
    results.iter().map(|r| r.record.id.clone()).collect()
}

// --- Ranking ---

/// Test: The exact product outranks partial and fuzzy matches.
#[rstest]
fn search_ranks_exact_name_first(catalog: Vec<Product>) {
    let results = fuzzy_search(&catalog, "wireless headphones", DEFAULT_SEARCH_FIELDS);
    let ids = ids(&results);

    check!(ids.first().map(String::as_str) == Some("prod_001"));
    check!(!ids.contains(&"prod_006".to_string()), "Cable should not match: {:?}", ids);
}

/// Test: "wireless headphone" against a name-only record follows the per-term,
/// per-token scoring loop: (10 + 8) + (10 + 5), boosted 1.5x for the name field.
#[rstest]
fn search_scores_prefix_scenario(catalog: Vec<Product>) {
    let terms = tokenize("wireless headphone");
    let score = calculate_relevance(&catalog[0], &terms, &["name"]);
    check!(score == 49.5);
}

/// Test: Empty queries return everything in catalog order.
#[rstest]
fn search_empty_query_is_identity(catalog: Vec<Product>) {
    let results = fuzzy_search(&catalog, "", DEFAULT_SEARCH_FIELDS);
    let expected: Vec<String> = catalog.iter().map(|p| p.id.clone()).collect();
    check!(ids(&results) == expected);
}

/// Test: Typos within two edits still find the product.
#[rstest]
fn search_tolerates_typos(catalog: Vec<Product>) {
    let results = fuzzy_search(&catalog, "hedphones", &["name"]);
    let ids = ids(&results);
    check!(ids.contains(&"prod_001".to_string()));
    check!(ids.contains(&"prod_002".to_string()));
}

// --- Filtering pipeline ---

/// Test: Filters compose on top of relevance ranking.
#[rstest]
fn search_with_filters(catalog: Vec<Product>) {
    let filters = SearchFilters {
        categories: vec!["audio".to_string()],
        price_range: Some(PriceRange::new(50.0, 150.0)),
        in_stock: true,
        rating: Some(4.0),
        sort_by: None,
    };
    let results = apply_filters(
        fuzzy_search(&catalog, "headphones", DEFAULT_SEARCH_FIELDS),
        &filters,
    );
    // Wired Headphones is out of stock; the stand is an accessory
    check!(ids(&results) == vec!["prod_001"]);
}

#[rstest]
#[case(SortBy::PriceAsc, vec!["prod_005", "prod_002", "prod_001"])]
#[case(SortBy::PriceDesc, vec!["prod_001", "prod_002", "prod_005"])]
#[case(SortBy::Rating, vec!["prod_005", "prod_001", "prod_002"])]
#[case(SortBy::Name, vec!["prod_005", "prod_002", "prod_001"])]
#[case(SortBy::Newest, vec!["prod_005", "prod_002", "prod_001"])]
fn search_sorts_headphones(
    catalog: Vec<Product>,
    #[case] sort_by: SortBy,
    #[case] expected: Vec<&str>,
) {
    let filters = SearchFilters {
        sort_by: Some(sort_by),
        ..SearchFilters::default()
    };
    let results = apply_filters(fuzzy_search(&catalog, "headphones", &["name"]), &filters);
    check!(ids(&results) == expected);
}

/// Test: Pagination reports the total before paging.
#[rstest]
fn search_pages_results(catalog: Vec<Product>) {
    let search = CatalogSearch::default();
    let filters = SearchFilters::default();

    let first = search.search(&catalog, "", &filters, 4, 0);
    let second = search.search(&catalog, "", &filters, 4, 4);

    check!(first.total == 6);
    check!(second.total == 6);
    check!(first.results.len() == 4);
    check!(second.results.len() == 2);
}

// --- Suggestions and presentation ---

#[rstest]
fn suggestions_complete_partial_words(catalog: Vec<Product>) {
    check!(
        generate_suggestions("wire", &catalog)
            == vec!["Wireless Headphones", "Wireless", "Wired Headphones", "Wired", "Wireless Earbuds"]
    );
}

#[test]
fn results_text_and_highlighting() {
    check!(search_results_text(0, "xyz") == r#"No results found for "xyz""#);
    check!(search_results_text(1, "xyz") == r#"1 result for "xyz""#);
    check!(search_results_text(2, "xyz") == r#"2 results for "xyz""#);
    check!(
        highlight_search_terms("Wireless Headphones", "wireless")
            == "<mark>Wireless</mark> Headphones"
    );
}

// --- URL round trip ---

#[test]
fn search_url_round_trip() {
    let filters = SearchFilters {
        categories: vec!["audio".to_string(), "accessories".to_string()],
        price_range: Some(PriceRange::new(20.0, 150.0)),
        in_stock: true,
        rating: Some(4.5),
        sort_by: Some(SortBy::Rating),
    };
    let url = build_search_url("noise cancelling", &filters);
    let parsed = parse_search_url(&url).unwrap();

    check!(parsed.query == "noise cancelling");
    check!(parsed.filters == filters);
}
