//! Error types for the crawler module

use crate::renderer::RendererError;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Invalid site configuration, caught before the crawl starts
    #[error("invalid site configuration: {0}")]
    Config(String),

    /// The renderer failed to start or hand out a session; aborts the run
    #[error("renderer acquisition failed: {0}")]
    Acquisition(String),

    /// A single page failed to load; isolated to that URL
    #[error("navigation failed for {url}: {reason}")]
    Navigation {
        /// The URL that failed to load
        url: String,
        /// Why the navigation failed
        reason: String,
    },

    /// Link extraction failed after a page load; recovered like a
    /// navigation failure
    #[error("link extraction failed: {0}")]
    LinkExtraction(String),
}

impl CrawlError {
    /// Whether this error aborts the whole crawl rather than a single page
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::Config(_) | CrawlError::Acquisition(_))
    }
}

impl From<RendererError> for CrawlError {
    fn from(err: RendererError) -> Self {
        match err {
            RendererError::Session(reason) => CrawlError::Acquisition(reason),
            RendererError::Navigation { url, reason } => CrawlError::Navigation { url, reason },
            RendererError::LinkExtraction(reason) => CrawlError::LinkExtraction(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_classification() {
        assert!(CrawlError::Config("bad".to_string()).is_fatal());
        assert!(CrawlError::Acquisition("down".to_string()).is_fatal());
        assert!(
            !CrawlError::Navigation {
                url: "https://a.com/".to_string(),
                reason: "timeout".to_string(),
            }
            .is_fatal()
        );
        assert!(!CrawlError::LinkExtraction("partial".to_string()).is_fatal());
    }

    #[test]
    fn test_renderer_error_mapping() {
        let err: CrawlError = RendererError::Session("no browser".to_string()).into();
        assert!(err.is_fatal());

        let err: CrawlError = RendererError::Navigation {
            url: "https://a.com/".to_string(),
            reason: "dns".to_string(),
        }
        .into();
        assert!(!err.is_fatal());
    }
}
