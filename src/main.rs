use rmcp::{ServiceExt, transport::stdio};
use storefront_search::{CatalogState, Config, server::CatalogServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr to avoid interfering with MCP protocol on stdout
    storefront_search::tracing::init();

    let config = Config::load(None)?;
    tracing::info!(
        "Starting storefront-search MCP server (backend: {})",
        config.api_base_url
    );

    let state = CatalogState::from_config(config)?;

    // Create and serve the MCP server over stdio
    let server = CatalogServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
