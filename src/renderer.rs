//! Page renderer collaborator
//!
//! The crawler does not fetch or render pages itself; it drives a renderer
//! through the [`Renderer`] and [`RendererSession`] traits. A renderer hands
//! out one session per page visit, and the crawler closes the session on
//! every exit path, success or failure.
//!
//! Two implementations are provided:
//!
//! - [`HttpRenderer`]: fetches pages over plain HTTP with reqwest and
//!   extracts anchors with scraper
//! - [`MockRenderer`]: a scriptable in-memory renderer for tests

mod http;
mod mock;

pub use http::{HttpRenderer, HttpSession};
pub use mock::{MockRenderer, MockSession};

use std::time::Duration;
use thiserror::Error;

/// Default user agent sent with page loads
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Error type for renderer operations
#[derive(Debug, Error)]
pub enum RendererError {
    /// Failure to open or close a session; fatal to the whole crawl
    #[error("renderer session error: {0}")]
    Session(String),

    /// A single page failed to load; recovered by the crawler
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

/// Configuration for a renderer
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Timeout for a full page load
    pub navigation_timeout: Duration,

    /// Timeout for other per-page operations
    pub default_timeout: Duration,

    /// User agent to send with page loads
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(60),
            default_timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// A page rendering engine that hands out per-page sessions.
///
/// Opening a session corresponds to opening a fresh page or tab; any failure
/// here is an acquisition error and aborts the crawl.
pub trait Renderer {
    /// The per-page session type
    type Session: RendererSession;

    /// Open a new session for a single page visit
    fn open_session(
        &self,
    ) -> impl Future<Output = Result<Self::Session, RendererError>> + Send;
}

/// A single-page rendering session.
///
/// Callers must invoke [`RendererSession::close`] on every exit path of a
/// visit regardless of success or failure.
pub trait RendererSession {
    /// Load the given URL and wait for the document to settle
    fn load(&mut self, url: &str) -> impl Future<Output = Result<(), RendererError>> + Send;

    /// Collect every anchor's resolved absolute href from the loaded document
    fn extract_links(
        &mut self,
    ) -> impl Future<Output = Result<Vec<String>, RendererError>> + Send;

    /// Release the per-page resources held by this session
    fn close(self) -> impl Future<Output = Result<(), RendererError>> + Send;
}
