//! Async client for the storefront search backend.
//!
//! Every call is best-effort: failures are logged and turned into empty results,
//! never surfaced to the caller. There is no retry, no timeout beyond reqwest's
//! defaults, and no coalescing of concurrent identical requests.

use crate::error::SearchError;
use crate::types::{SearchFilters, SearchResponse};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const SEARCH_ENDPOINT: &str = "api/search";
const SUGGESTIONS_ENDPOINT: &str = "api/search/suggestions";
const ANALYTICS_ENDPOINT: &str = "api/analytics/events";

/// Supplies the analytics session id. Injected so the client never reaches for
/// host-global state.
pub trait SessionIdProvider: Send + Sync {
    fn session_id(&self) -> String;
}

/// A session id fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticSessionId(pub String);

impl SessionIdProvider for StaticSessionId {
    fn session_id(&self) -> String {
        self.0.clone()
    }
}

/// A session id generated at construction: `session_<millis>_<hash>`.
#[derive(Debug, Clone)]
pub struct GeneratedSessionId {
    id: String,
}

impl GeneratedSessionId {
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seed = format!("{}:{}:{:?}", millis, std::process::id(), std::thread::current().id());
        let suffix = xxhash_rust::xxh3::xxh3_64(seed.as_bytes());

        Self {
            id: format!("session_{}_{:x}", millis, suffix),
        }
    }
}

impl Default for GeneratedSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionIdProvider for GeneratedSessionId {
    fn session_id(&self) -> String {
        self.id.clone()
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Serialize)]
struct SearchRequestBody<'a> {
    query: &'a str,
    filters: &'a SearchFilters,
    limit: usize,
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct SuggestionsBody {
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Body of `POST /api/analytics/events`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsEvent {
    event_type: &'static str,
    session_id: String,
    properties: SearchEventProperties,
}

#[derive(Debug, Serialize)]
struct SearchEventProperties {
    query: String,
    results: u64,
    filters: SearchFilters,
}

/// Client for the storefront search endpoints. Cheap to clone.
#[derive(Clone)]
pub struct SearchClient {
    http: Client,
    base_url: Url,
    session: Arc<dyn SessionIdProvider>,
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SearchClient {
    /// Create a client for the backend at `base_url` with a generated session id.
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        Self::with_session(base_url, Arc::new(GeneratedSessionId::new()))
    }

    /// Create a client with an explicit session id provider.
    pub fn with_session(
        base_url: &str,
        session: Arc<dyn SessionIdProvider>,
    ) -> Result<Self, SearchError> {
        // A trailing slash makes relative endpoint joins append instead of replace
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| SearchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: Client::new(),
            base_url,
            session,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchError> {
        self.base_url
            .join(path)
            .map_err(|e| SearchError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Search the backend. Any failure yields [`SearchResponse::empty`].
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> SearchResponse {
        match self.try_search(query, filters, limit, offset).await {
            Ok(response) => {
                tracing::debug!(
                    "Search for '{}' returned {} of {} results",
                    query,
                    response.results.len(),
                    response.total
                );
                response
            }
            Err(e) => {
                tracing::warn!("Search for '{}' failed: {}", query, e);
                SearchResponse::empty(query, filters)
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> Result<SearchResponse, SearchError> {
        let body = SearchRequestBody {
            query,
            filters,
            limit,
            offset,
        };
        let response = self
            .http
            .post(self.endpoint(SEARCH_ENDPOINT)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Fetch type-ahead suggestions. Any failure yields an empty list.
    pub async fn suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        match self.try_suggestions(query, limit).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("Suggestions for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn try_suggestions(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let mut url = self.endpoint(SUGGESTIONS_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }
        Ok(response.json::<SuggestionsBody>().await?.suggestions)
    }

    /// Record a search in analytics without waiting for it.
    ///
    /// The event is sent on a detached task; failures are logged there. The
    /// returned handle may be awaited but never needs to be. Must be called
    /// from within a tokio runtime.
    pub fn track_search(
        &self,
        query: &str,
        results: u64,
        filters: &SearchFilters,
    ) -> tokio::task::JoinHandle<()> {
        let event = AnalyticsEvent {
            event_type: "search",
            session_id: self.session.session_id(),
            properties: SearchEventProperties {
                query: query.to_string(),
                results,
                filters: filters.clone(),
            },
        };
        let client = self.clone();

        tokio::spawn(async move {
            if let Err(e) = client.send_event(&event).await {
                tracing::warn!("Failed to track search '{}': {}", event.properties.query, e);
            }
        })
    }

    async fn send_event(&self, event: &AnalyticsEvent) -> Result<(), SearchError> {
        let response = self
            .http
            .post(self.endpoint(ANALYTICS_ENDPOINT)?)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }
        tracing::trace!("Tracked search event for session {}", event.session_id);
        Ok(())
    }
}
