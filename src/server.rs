//! MCP server exposing catalog search over stdio.

use crate::state::CatalogState;
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::search_url::{
    BuildSearchUrlRequest, ParseSearchUrlRequest, handle_build_search_url,
    handle_parse_search_url,
};
use crate::tools::suggest::{SuggestRequest, handle_suggest};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for storefront product search.
#[derive(Clone)]
pub struct CatalogServer {
    /// Shared catalog, configuration and backend client
    state: Arc<CatalogState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CatalogServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl CatalogServer {
    /// Create a new CatalogServer over already-built state.
    pub fn new(state: Arc<CatalogState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state.
    pub const fn state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    #[tool(
        description = "Search the product catalog with fuzzy matching on names and descriptions. Supports category, price range, in-stock and minimum rating filters, and sorting by relevance, price_asc, price_desc, name, rating or newest. Set remote=true to query the storefront backend instead of the local catalog.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_catalog(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Suggest product names and name words that complete a partial query (at most 5).",
        input_schema = inline_schema_for_type::<SuggestRequest>()
    )]
    async fn suggest(
        &self,
        Parameters(request): Parameters<SuggestRequest>,
    ) -> std::result::Result<String, String> {
        handle_suggest(&self.state, request).await
    }

    #[tool(
        description = "Build a shareable storefront /search URL from a query and filters.",
        input_schema = inline_schema_for_type::<BuildSearchUrlRequest>()
    )]
    async fn build_search_url(
        &self,
        Parameters(request): Parameters<BuildSearchUrlRequest>,
    ) -> std::result::Result<String, String> {
        handle_build_search_url(&request)
    }

    #[tool(
        description = "Parse a storefront /search URL into its query and filters. Unknown sort values are rejected.",
        input_schema = inline_schema_for_type::<ParseSearchUrlRequest>()
    )]
    async fn parse_search_url(
        &self,
        Parameters(request): Parameters<ParseSearchUrlRequest>,
    ) -> std::result::Result<String, String> {
        handle_parse_search_url(&request)
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(format!(
                "storefront-search: fuzzy product search over a catalog of {} products. \
                 Use search_catalog to find products, suggest for type-ahead, and \
                 build_search_url / parse_search_url to move between filters and storefront links.",
                self.state.catalog().len()
            ))
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline definitions instead of $ref patterns, so MCP clients render
/// nested parameters directly.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
