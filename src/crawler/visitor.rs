//! Per-page visitor
//!
//! Drives the renderer collaborator to load one URL and collect its outbound
//! links. The session is closed on every exit path; a close failure is a
//! renderer release failure and takes precedence over a recoverable page
//! error.

use tracing::debug;

use super::error::CrawlError;
use crate::renderer::{Renderer, RendererSession};

/// Loads single pages through a renderer and reports their outbound links.
///
/// Links are returned as raw strings exactly as the renderer resolved them;
/// normalization and eligibility filtering are the orchestrator's job.
#[derive(Debug)]
pub struct PageVisitor<'a, R: Renderer> {
    renderer: &'a R,
}

impl<'a, R: Renderer> PageVisitor<'a, R> {
    /// Create a visitor that opens sessions from the given renderer
    pub fn new(renderer: &'a R) -> Self {
        Self { renderer }
    }

    /// Visit one URL and return the outbound links found on the page
    pub async fn visit(&self, url: &str) -> Result<Vec<String>, CrawlError> {
        let mut session = self
            .renderer
            .open_session()
            .await
            .map_err(CrawlError::from)?;

        let outcome = match session.load(url).await {
            Ok(()) => session.extract_links().await,
            Err(e) => Err(e),
        };

        // Release the session before inspecting the page outcome so the
        // per-page resource is never leaked; release failures are fatal and
        // win over recoverable page errors.
        session.close().await.map_err(CrawlError::from)?;

        let links = outcome.map_err(CrawlError::from)?;
        debug!(url, count = links.len(), "visit complete");
        Ok(links)
    }
}
