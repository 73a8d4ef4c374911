//! Fuzzy product search for a storefront catalog.
//!
//! The [`search`] module holds the pure pipeline: tokenizer, relevance scoring,
//! filters and sorting, suggestions, and `/search` URL serialization.
//! [`SearchClient`] talks to the storefront backend, and [`server::CatalogServer`]
//! exposes both over MCP.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;
pub mod types;

pub use catalog::{Catalog, CatalogSearch};
pub use client::{GeneratedSessionId, SearchClient, SessionIdProvider, StaticSessionId};
pub use config::Config;
pub use error::SearchError;
pub use state::CatalogState;
pub use types::{
    Facets, PriceRange, Product, SearchFilters, SearchPage, SearchResponse, SearchResult,
    Searchable, SortBy,
};
