//! Shared, read-only state behind the MCP tools.

use crate::catalog::{Catalog, CatalogSearch};
use crate::client::SearchClient;
use crate::config::Config;
use crate::error::Result;
use anyhow::Context;
use std::sync::Arc;

/// Everything a tool handler needs: the loaded catalog, configuration, and a
/// backend client. Built once at startup and shared behind an `Arc`.
pub struct CatalogState {
    catalog: Catalog,
    config: Config,
    client: SearchClient,
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("products", &self.catalog.len())
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}

impl CatalogState {
    pub fn new(catalog: Catalog, config: Config, client: SearchClient) -> Self {
        Self {
            catalog,
            config,
            client,
        }
    }

    /// Build state from configuration: load the catalog (if configured) and
    /// create the backend client.
    pub fn from_config(config: Config) -> Result<Arc<Self>> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => {
                tracing::warn!("No catalog_path configured; local search has no products");
                Catalog::default()
            }
        };
        let client = SearchClient::new(&config.api_base_url)
            .with_context(|| format!("Invalid api_base_url {}", config.api_base_url))?;

        Ok(Arc::new(Self::new(catalog, config, client)))
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn client(&self) -> &SearchClient {
        &self.client
    }

    /// Run `f` with the local search pipeline configured for this state.
    pub fn with_search<T>(&self, f: impl FnOnce(&CatalogSearch<'_>) -> T) -> T {
        let fields = self.config.search_fields();
        f(&CatalogSearch::new(&fields))
    }
}
