//! Type-ahead suggestion tool.

use crate::state::CatalogState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SuggestRequest {
    /// Partial query typed so far
    pub query: String,
    /// Ask the storefront backend instead of the local catalog
    #[serde(default)]
    pub remote: bool,
}

/// Returns suggestions one per line, or a short note when there are none.
pub async fn handle_suggest(
    state: &Arc<CatalogState>,
    request: SuggestRequest,
) -> Result<String, String> {
    let suggestions = if request.remote {
        state
            .client()
            .suggestions(&request.query, state.config().suggestion_limit)
            .await
    } else {
        state.catalog().suggestions(&request.query)
    };

    if suggestions.is_empty() {
        return Ok(format!("No suggestions for '{}'.", request.query));
    }

    Ok(suggestions.join("\n"))
}
