//! HTTP-backed renderer implementation
//!
//! Fetches pages with reqwest and extracts anchors with scraper. This covers
//! static sites; pages that only materialize their links through client-side
//! scripting need a browser-backed [`Renderer`] implementation instead.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::{Renderer, RendererConfig, RendererError, RendererSession};

/// Renderer that loads pages over plain HTTP
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Create a new HTTP renderer with the given configuration
    pub fn new(config: RendererConfig) -> Result<Self, RendererError> {
        let client = Client::builder()
            .timeout(config.navigation_timeout)
            .connect_timeout(config.default_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| RendererError::Session(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    type Session = HttpSession;

    async fn open_session(&self) -> Result<HttpSession, RendererError> {
        Ok(HttpSession {
            client: self.client.clone(),
            document: None,
        })
    }
}

/// A single-page HTTP session holding the fetched document
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    document: Option<LoadedDocument>,
}

#[derive(Debug)]
struct LoadedDocument {
    // Final URL after redirects, used as the base for resolving hrefs
    base: Url,
    html: String,
}

impl RendererSession for HttpSession {
    async fn load(&mut self, url: &str) -> Result<(), RendererError> {
        let navigation = |reason: String| RendererError::Navigation {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| navigation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(navigation(format!("HTTP {status}")));
        }

        let base = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| navigation(e.to_string()))?;

        debug!(url, bytes = html.len(), "page loaded");
        self.document = Some(LoadedDocument { base, html });
        Ok(())
    }

    async fn extract_links(&mut self) -> Result<Vec<String>, RendererError> {
        let loaded = self
            .document
            .as_ref()
            .ok_or_else(|| RendererError::LinkExtraction("no document loaded".to_string()))?;

        let selector = Selector::parse("a[href]")
            .map_err(|e| RendererError::LinkExtraction(format!("invalid selector: {e}")))?;

        let document = Html::parse_document(&loaded.html);
        let mut links = Vec::new();

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
                || href.starts_with("javascript:")
            {
                continue;
            }

            if let Ok(resolved) = loaded.base.join(href) {
                if matches!(resolved.scheme(), "http" | "https") {
                    links.push(resolved.to_string());
                }
            }
        }

        debug!(url = %loaded.base, count = links.len(), "extracted links");
        Ok(links)
    }

    async fn close(self) -> Result<(), RendererError> {
        // Nothing to release; the HTTP client is shared and connection
        // pooling is handled by reqwest.
        Ok(())
    }
}
