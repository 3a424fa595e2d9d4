//! # sitecrawl - Same-Domain Website Crawler
//!
//! This crate provides a breadth-first, same-domain website crawler bounded by
//! depth, path allow/deny rules, and a politeness delay. A crawl produces a
//! deduplicated, ordered list of visited pages with their discovery depth and
//! visit timestamp.
//!
//! ## Features
//!
//! - Strict FIFO breadth-first traversal with canonical-URL deduplication
//! - Path prefix allow/deny policies (deny always wins)
//! - Configurable politeness delay between page visits
//! - Per-page failure isolation: a failed page never aborts the crawl
//! - Pluggable page renderer via the [`renderer::Renderer`] trait, with an
//!   HTTP-backed implementation and a scriptable mock for tests
//! - Site registries loadable from JSON files
//! - Plain URL-list persistence for downstream capture tooling
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitecrawl::crawler::{Crawler, SiteConfig};
//! use sitecrawl::renderer::{HttpRenderer, RendererConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SiteConfig::builder("example", "https://example.com/")
//!         .max_depth(2)
//!         .excluded_paths(vec!["/admin".to_string()])
//!         .crawl_delay_ms(1000)
//!         .build();
//!
//!     let renderer = HttpRenderer::new(RendererConfig::default())?;
//!     let mut crawler = Crawler::new(&renderer, config);
//!     let results = crawler.crawl().await?;
//!
//!     for result in &results {
//!         println!("[depth {}] {}", result.depth, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod renderer;
pub mod url_source;
pub mod urls;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::crawler::{CrawlResult, Crawler, SiteConfig};
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::renderer::{Renderer, RendererSession};
}
