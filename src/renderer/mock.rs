//! # Mock Renderer for Testing
//!
//! Provides a `MockRenderer` that implements the `Renderer` trait for use in
//! tests. Pages are scripted as a link graph keyed by URL, navigation
//! failures can be injected per URL, and every load is recorded so tests can
//! assert on visit order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{Renderer, RendererError, RendererSession};

/// A mock renderer backed by a scripted link graph.
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    pages: Arc<Mutex<HashMap<String, Vec<String>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    loads: Arc<Mutex<Vec<String>>>,
    fail_open: Arc<AtomicBool>,
    open_sessions: Arc<Mutex<usize>>,
}

impl MockRenderer {
    /// Creates a new mock renderer with no pages scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a page: loading `url` succeeds and yields the given links.
    pub async fn add_page(&self, url: &str, links: &[&str]) {
        let mut pages = self.pages.lock().await;
        pages.insert(
            url.to_string(),
            links.iter().map(|link| link.to_string()).collect(),
        );
    }

    /// Makes any load of `url` fail with a navigation error.
    pub async fn fail_navigation(&self, url: &str) {
        let mut failing = self.failing.lock().await;
        failing.insert(url.to_string());
    }

    /// Makes `open_session` fail, simulating renderer acquisition failure.
    pub fn fail_acquisition(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    /// Returns every URL loaded so far, in load order.
    pub async fn loaded_urls(&self) -> Vec<String> {
        self.loads.lock().await.clone()
    }

    /// Returns the number of sessions opened but not yet closed.
    pub async fn open_session_count(&self) -> usize {
        *self.open_sessions.lock().await
    }
}

impl Renderer for MockRenderer {
    type Session = MockSession;

    async fn open_session(&self) -> Result<MockSession, RendererError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(RendererError::Session(
                "mock renderer configured to fail acquisition".to_string(),
            ));
        }

        let mut open = self.open_sessions.lock().await;
        *open += 1;

        Ok(MockSession {
            pages: Arc::clone(&self.pages),
            failing: Arc::clone(&self.failing),
            loads: Arc::clone(&self.loads),
            open_sessions: Arc::clone(&self.open_sessions),
            current: None,
        })
    }
}

/// A single-page session handed out by [`MockRenderer`].
#[derive(Debug)]
pub struct MockSession {
    pages: Arc<Mutex<HashMap<String, Vec<String>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    loads: Arc<Mutex<Vec<String>>>,
    open_sessions: Arc<Mutex<usize>>,
    current: Option<String>,
}

impl RendererSession for MockSession {
    async fn load(&mut self, url: &str) -> Result<(), RendererError> {
        self.loads.lock().await.push(url.to_string());

        if self.failing.lock().await.contains(url) {
            return Err(RendererError::Navigation {
                url: url.to_string(),
                reason: "scripted navigation failure".to_string(),
            });
        }

        if !self.pages.lock().await.contains_key(url) {
            return Err(RendererError::Navigation {
                url: url.to_string(),
                reason: "page not scripted".to_string(),
            });
        }

        self.current = Some(url.to_string());
        Ok(())
    }

    async fn extract_links(&mut self) -> Result<Vec<String>, RendererError> {
        let url = self
            .current
            .as_ref()
            .ok_or_else(|| RendererError::LinkExtraction("no document loaded".to_string()))?;

        let pages = self.pages.lock().await;
        Ok(pages.get(url).cloned().unwrap_or_default())
    }

    async fn close(self) -> Result<(), RendererError> {
        let mut open = self.open_sessions.lock().await;
        *open -= 1;
        Ok(())
    }
}
