//! Site configuration for the crawler
//!
//! `SiteConfig` captures everything a single crawl run needs: the seed URL
//! (which also anchors the same-domain check), the inclusive depth bound,
//! path prefix allow/deny lists, and the politeness delay between visits.
//! Configurations are immutable for the duration of one crawl and use a
//! builder for construction.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::CrawlError;
use crate::urls;

/// Configuration for crawling one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Identifier for the site
    pub name: String,

    /// Seed URL; its hostname anchors the same-domain policy
    pub base_url: String,

    /// Maximum crawl depth, inclusive (seed = 0)
    #[serde(default)]
    pub max_depth: u32,

    /// Path prefixes eligible for crawling; empty allows every path
    #[serde(default)]
    pub allowed_paths: Vec<String>,

    /// Path prefixes never crawled; deny overrides allow
    #[serde(default)]
    pub excluded_paths: Vec<String>,

    /// Politeness delay in milliseconds between successive page visits
    #[serde(default)]
    pub crawl_delay_ms: u64,
}

impl SiteConfig {
    /// Create a new builder for the given site name and seed URL
    pub fn builder(name: impl Into<String>, base_url: impl Into<String>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(name, base_url)
    }

    /// Get the politeness delay as a Duration
    pub fn crawl_delay(&self) -> Duration {
        Duration::from_millis(self.crawl_delay_ms)
    }

    /// Check the configuration before a crawl starts
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.name.trim().is_empty() {
            return Err(CrawlError::Config("site name must not be empty".to_string()));
        }
        if !urls::is_valid_url(&self.base_url) {
            return Err(CrawlError::Config(format!(
                "base URL is not an absolute URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Builder for SiteConfig
#[derive(Debug)]
pub struct SiteConfigBuilder {
    config: SiteConfig,
}

impl SiteConfigBuilder {
    /// Create a new builder with default depth, policies, and delay
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            config: SiteConfig {
                name: name.into(),
                base_url: base_url.into(),
                max_depth: 0,
                allowed_paths: Vec::new(),
                excluded_paths: Vec::new(),
                crawl_delay_ms: 0,
            },
        }
    }

    /// Set the maximum crawl depth (inclusive)
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the path prefixes eligible for crawling
    pub fn allowed_paths(mut self, allowed_paths: Vec<String>) -> Self {
        self.config.allowed_paths = allowed_paths;
        self
    }

    /// Set the path prefixes that are never crawled
    pub fn excluded_paths(mut self, excluded_paths: Vec<String>) -> Self {
        self.config.excluded_paths = excluded_paths;
        self
    }

    /// Set the politeness delay in milliseconds between page visits
    pub fn crawl_delay_ms(mut self, crawl_delay_ms: u64) -> Self {
        self.config.crawl_delay_ms = crawl_delay_ms;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SiteConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SiteConfig::builder("example", "https://example.com/").build();
        assert_eq!(config.name, "example");
        assert_eq!(config.base_url, "https://example.com/");
        assert_eq!(config.max_depth, 0);
        assert!(config.allowed_paths.is_empty());
        assert!(config.excluded_paths.is_empty());
        assert_eq!(config.crawl_delay(), Duration::ZERO);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = SiteConfig::builder("example", "https://example.com/")
            .max_depth(3)
            .allowed_paths(vec!["/docs".to_string()])
            .excluded_paths(vec!["/admin".to_string()])
            .crawl_delay_ms(750)
            .build();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.allowed_paths, vec!["/docs".to_string()]);
        assert_eq!(config.excluded_paths, vec!["/admin".to_string()]);
        assert_eq!(config.crawl_delay(), Duration::from_millis(750));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let config = SiteConfig::builder("", "https://example.com/").build();
        assert!(matches!(config.validate(), Err(CrawlError::Config(_))));

        let config = SiteConfig::builder("example", "not a url").build();
        assert!(matches!(config.validate(), Err(CrawlError::Config(_))));

        let config = SiteConfig::builder("example", "https://example.com/").build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults_for_optional_fields() {
        let json = r#"{"name":"example","base_url":"https://example.com/"}"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_depth, 0);
        assert!(config.allowed_paths.is_empty());
        assert_eq!(config.crawl_delay_ms, 0);
    }
}
