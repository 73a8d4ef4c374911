//! Configuration loaded from TOML, with environment overrides.
//!
//! Lookup order:
//! 1. An explicit path, or `STOREFRONT_SEARCH_CONFIG`
//! 2. `<config dir>/storefront-search/config.toml`
//! 3. Built-in defaults
//!
//! `STOREFRONT_SEARCH_API_URL` and `STOREFRONT_SEARCH_CATALOG` override the
//! corresponding file values.

use crate::error::Result;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STOREFRONT_SEARCH_CONFIG";
/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_SEARCH_API_URL";
/// Environment variable overriding `catalog_path`.
pub const CATALOG_ENV: &str = "STOREFRONT_SEARCH_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin of the storefront backend, e.g. `https://shop.example.com`.
    pub api_base_url: String,
    /// JSON product catalog served by the MCP server.
    pub catalog_path: Option<PathBuf>,
    /// Record fields scored by local search.
    pub search_fields: Vec<String>,
    /// Page size when a request does not give one.
    pub default_limit: usize,
    /// Number of suggestions requested from the backend.
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            catalog_path: None,
            search_fields: crate::search::DEFAULT_SEARCH_FIELDS
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
            default_limit: 20,
            suggestion_limit: crate::search::MAX_SUGGESTIONS,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("storefront-search").join("config.toml"))
    }

    /// Load configuration from `explicit`, the default location, or defaults,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file. Relative to nothing; `~` in `catalog_path` is expanded.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.expand_paths();

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(CATALOG_ENV).filter(|v| !v.trim().is_empty()) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        self.expand_paths();
    }

    fn expand_paths(&mut self) {
        let expanded = self
            .catalog_path
            .as_deref()
            .and_then(Path::to_str)
            .map(|s| expand_tilde(s).into_owned());
        if let Some(expanded) = expanded {
            self.catalog_path = Some(PathBuf::from(expanded));
        }
    }

    fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api_base_url).is_err() {
            bail!("api_base_url is not a valid URL: {}", self.api_base_url);
        }
        if self.search_fields.is_empty() {
            bail!("search_fields must name at least one field");
        }
        if self.default_limit == 0 {
            bail!("default_limit must be positive");
        }
        Ok(())
    }

    /// Search fields as borrowed strings, for [`crate::CatalogSearch`].
    pub fn search_fields(&self) -> Vec<&str> {
        self.search_fields.iter().map(String::as_str).collect()
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
