//! Error handling types and utilities.

/// A specialized Result type for storefront-search application plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods (config loading, catalog loading, the server binary).
pub type Result<T> = anyhow::Result<T>;

/// Errors produced by the search library itself.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A filter value at a deserialization boundary was not recognized.
    #[error("invalid filter '{field}': {value:?}")]
    InvalidFilter { field: &'static str, value: String },

    /// A search URL could not be parsed.
    #[error("invalid search url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure talking to the search backend.
    #[error("search backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The search backend answered with a non-success status.
    #[error("search backend returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

impl SearchError {
    pub(crate) fn invalid_filter(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFilter {
            field,
            value: value.into(),
        }
    }
}
