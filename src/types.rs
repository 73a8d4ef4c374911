//! Catalog records, search filters, and result types shared by the search
//! pipeline, the backend client, and the MCP tools.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A record the search pipeline can score, filter, and sort.
///
/// Implementors expose named text fields for scoring plus the structured
/// attributes the filters look at. Records are never mutated by the pipeline.
pub trait Searchable {
    /// Stable identifier. Also drives the `newest` sort.
    fn id(&self) -> &str;

    /// Display name, used for suggestions and the `name` sort.
    fn name(&self) -> &str;

    /// Text of a named field, or `None` if the record has no such field.
    fn text_field(&self, field: &str) -> Option<&str>;

    fn category_id(&self) -> Option<&str>;

    fn price(&self) -> f64;

    fn inventory_count(&self) -> i64;

    fn rating(&self) -> Option<f64>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        (**self).text_field(field)
    }

    fn category_id(&self) -> Option<&str> {
        (**self).category_id()
    }

    fn price(&self) -> f64 {
        (**self).price()
    }

    fn inventory_count(&self) -> i64 {
        (**self).inventory_count()
    }

    fn rating(&self) -> Option<f64> {
        (**self).rating()
    }
}

/// A product in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "category_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub price: f64,
    #[serde(default, alias = "inventory_count")]
    pub inventory_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Searchable for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "name" | "title" => Some(&self.name),
            "description" => self.description.as_deref(),
            "slug" => self.slug.as_deref(),
            "category" | "category_id" | "categoryId" => self.category_id.as_deref(),
            _ => None,
        }
    }

    fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn inventory_count(&self) -> i64 {
        self.inventory_count
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }
}

/// Sort strategy applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Name,
    Rating,
    /// Descending by record id. Assumes newer records have larger ids.
    Newest,
}

impl SortBy {
    pub const ALL: [Self; 6] = [
        Self::Relevance,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Name,
        Self::Rating,
        Self::Newest,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| SearchError::invalid_filter("sort", s))
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Structured constraints applied on top of text relevance.
///
/// Every field is optional; an unset field leaves results untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_stock: bool,
    /// Minimum rating threshold; unrated records count as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

impl SearchFilters {
    /// Returns true if no constraint and no explicit sort is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A record annotated with its relevance for one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<R> {
    pub record: R,
    pub relevance_score: f64,
}

impl<R> SearchResult<R> {
    pub const fn new(record: R, relevance_score: f64) -> Self {
        Self {
            record,
            relevance_score,
        }
    }
}

/// One page of locally computed results.
#[derive(Debug, Clone)]
pub struct SearchPage<R> {
    pub results: Vec<SearchResult<R>>,
    /// Number of matches before pagination.
    pub total: usize,
}

/// A value/count pair within a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// A price bucket within the price facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

/// Facet counts, computed by the backend and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    #[serde(default)]
    pub categories: Vec<FacetCount>,
    #[serde(default)]
    pub price_ranges: Vec<PriceBucket>,
    #[serde(default)]
    pub ratings: Vec<FacetCount>,
}

/// Response body of `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub facets: Facets,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchResponse {
    /// The degraded response returned when the backend cannot be reached.
    pub fn empty(query: &str, filters: &SearchFilters) -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            facets: Facets::default(),
            suggestions: Vec::new(),
            query: query.to_string(),
            filters: filters.clone(),
        }
    }
}
