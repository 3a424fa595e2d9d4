//! Error types for the sitecrawl crate

use thiserror::Error;

/// Result type for sitecrawl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sitecrawl operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, surfaced before a crawl starts
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested site is not present in the registry
    #[error("Unknown site: {name}. Available: {available}")]
    UnknownSite {
        /// The site name that was requested
        name: String,
        /// Comma-separated list of registered site names
        available: String,
    },

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(#[from] crate::crawler::CrawlError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
