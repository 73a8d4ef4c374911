//! Product search: tokenization, fuzzy relevance scoring, structured filters,
//! suggestions, and search-URL serialization.
//!
//! Everything here is pure and synchronous; nothing holds state between calls.

// Module declarations
pub(crate) mod filter;
pub(crate) mod fuzzy;
pub(crate) mod highlight;
pub(crate) mod scoring;
pub(crate) mod suggest;
pub(crate) mod tokenize;
pub(crate) mod url;

// Public re-exports (used via lib.rs)
pub use filter::{apply_filters, sort_results};
pub use fuzzy::{DEFAULT_SEARCH_FIELDS, fuzzy_search};
pub use highlight::{highlight_search_terms, search_results_text};
pub use scoring::{calculate_relevance, edit_distance};
pub use suggest::{MAX_SUGGESTIONS, generate_suggestions};
pub use tokenize::tokenize;
pub use url::{ParsedSearch, SEARCH_PATH, build_search_url, parse_search_url};
