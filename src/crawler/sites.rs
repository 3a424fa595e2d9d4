//! Named site configurations
//!
//! A `SiteRegistry` maps site names to their crawl configurations so the CLI
//! can refer to sites by name. Registries are plain JSON documents:
//!
//! ```json
//! {
//!   "sites": [
//!     {
//!       "name": "example",
//!       "base_url": "https://example.com/",
//!       "max_depth": 2,
//!       "allowed_paths": ["/"],
//!       "excluded_paths": ["/admin", "/login"],
//!       "crawl_delay_ms": 1000
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use super::config::SiteConfig;
use crate::error::{Error, Result};

/// A collection of named site configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRegistry {
    sites: Vec<SiteConfig>,
}

impl SiteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let registry: SiteRegistry = serde_json::from_str(&content)?;
        Ok(registry)
    }

    /// Add a site configuration, replacing any existing one with the same name
    pub fn register(&mut self, config: SiteConfig) {
        self.sites.retain(|site| site.name != config.name);
        self.sites.push(config);
    }

    /// Look up a site by name
    pub fn get(&self, name: &str) -> Result<&SiteConfig> {
        self.sites
            .iter()
            .find(|site| site.name == name)
            .ok_or_else(|| Error::UnknownSite {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// List the registered site names
    pub fn names(&self) -> Vec<String> {
        self.sites.iter().map(|site| site.name.clone()).collect()
    }

    /// Iterate over the registered sites
    pub fn sites(&self) -> impl Iterator<Item = &SiteConfig> {
        self.sites.iter()
    }

    /// Number of registered sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the registry has no sites
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
