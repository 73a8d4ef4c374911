//! In-memory product catalog and the local search pipeline over it.

use crate::error::Result;
use crate::search::{apply_filters, fuzzy_search, generate_suggestions};
use crate::types::{Product, SearchFilters, SearchPage, Searchable};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Runs fuzzy search, filters, sort and pagination in one pass.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSearch<'f> {
    fields: &'f [&'f str],
}

impl<'f> CatalogSearch<'f> {
    /// Search the given text fields of each record.
    pub const fn new(fields: &'f [&'f str]) -> Self {
        Self { fields }
    }

    /// Returns one page of matches and the number of matches before paging.
    pub fn search<'a, R: Searchable>(
        &self,
        records: &'a [R],
        query: &str,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> SearchPage<&'a R> {
        let matches = apply_filters(fuzzy_search(records, query, self.fields), filters);
        let total = matches.len();
        let results = matches.into_iter().skip(offset).take(limit).collect();

        SearchPage { results, total }
    }
}

impl Default for CatalogSearch<'static> {
    fn default() -> Self {
        Self::new(crate::search::DEFAULT_SEARCH_FIELDS)
    }
}

/// A loaded set of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl Catalog {
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON file holding either an array of products or
    /// an object with a `products` array.
    pub fn load(path: &Path) -> Result<Self> {
        let start = std::time::Instant::now();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

        tracing::info!(
            "Loaded {} products from {} in {:?}",
            catalog.len(),
            path.display(),
            start.elapsed()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let products = match serde_json::from_str::<CatalogFile>(raw)? {
            CatalogFile::Bare(products) | CatalogFile::Wrapped { products } => products,
        };
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Search this catalog with the given pipeline.
    pub fn search(
        &self,
        search: &CatalogSearch<'_>,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> SearchPage<&Product> {
        search.search(&self.products, query, filters, limit, offset)
    }

    /// Type-ahead suggestions from product names.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        generate_suggestions(query, &self.products)
    }
}
