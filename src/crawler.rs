//! Website crawler module
//!
//! This module provides the breadth-first crawl engine: site configuration,
//! the FIFO frontier with visited-set deduplication, the per-page visitor,
//! and the orchestrator loop tying them together.
//!
//! ## Key Components
//!
//! - `SiteConfig`: per-site crawl parameters (seed URL, depth bound, path
//!   policies, politeness delay)
//! - `SiteRegistry`: named site configurations loadable from JSON
//! - `Frontier`: the FIFO work queue plus visited-URL set
//! - `Crawler`: the crawl loop, generic over a [`crate::renderer::Renderer`]
//! - `crawl_site`: convenience entry point for a one-shot crawl

mod config;
mod core;
mod error;
mod frontier;
mod sites;
mod visitor;

pub use config::{SiteConfig, SiteConfigBuilder};
pub use self::core::{Crawler, crawl_site};
pub use error::CrawlError;
pub use frontier::{Frontier, FrontierItem};
pub use sites::SiteRegistry;
pub use visitor::PageVisitor;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successfully visited page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Canonical URL of the page
    pub url: String,

    /// Distance in accepted-link hops from the seed URL (seed = 0)
    pub depth: u32,

    /// Wall-clock time of the visit
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_result_serde_roundtrip() {
        let result = CrawlResult {
            url: "https://example.com/docs".to_string(),
            depth: 1,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: CrawlResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
