//! Crawl orchestrator
//!
//! The control loop tying the frontier and the page visitor together. One
//! crawl run proceeds strictly sequentially: a URL is popped, canonicalized,
//! checked against the visited set and the depth bound, visited through the
//! renderer, and its accepted links re-enter the frontier at depth + 1. The
//! politeness delay applies after every visit attempt, success or failure.
//!
//! Sequential visits keep the delay contract trivially correct (exactly one
//! delay window between consecutive visits) and let the frontier and visited
//! set stay plain single-owner structures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{info, instrument, warn};

use super::config::SiteConfig;
use super::error::CrawlError;
use super::frontier::Frontier;
use super::visitor::PageVisitor;
use super::CrawlResult;
use crate::renderer::Renderer;
use crate::urls;

/// Breadth-first, same-domain crawler for a single site.
///
/// The renderer is an externally owned resource passed in by the caller; the
/// crawler never launches or tears down the rendering engine itself.
#[derive(Debug)]
pub struct Crawler<'a, R: Renderer> {
    renderer: &'a R,
    config: SiteConfig,
    frontier: Frontier,
    results: Vec<CrawlResult>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, R: Renderer> Crawler<'a, R> {
    /// Create a crawler for the given site using the given renderer
    pub fn new(renderer: &'a R, config: SiteConfig) -> Self {
        Self {
            renderer,
            config,
            frontier: Frontier::new(),
            results: Vec::new(),
            cancel: None,
        }
    }

    /// Attach a cancellation flag.
    ///
    /// The flag is checked between loop iterations; when set, the crawl stops
    /// before the next dequeue and returns whatever was accumulated so far.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Run the crawl to completion and return the visited pages in order.
    ///
    /// Starts from a fresh frontier every call. Fails only on configuration
    /// or renderer acquisition errors; per-page failures are logged and the
    /// failed URL is skipped, never retried.
    #[instrument(skip(self), fields(site = %self.config.name))]
    pub async fn crawl(&mut self) -> Result<Vec<CrawlResult>, CrawlError> {
        self.config.validate()?;

        // Fresh state per run; visited URLs are not persisted across runs.
        self.frontier = Frontier::new();
        self.results.clear();

        let started = Instant::now();
        info!(
            base_url = %self.config.base_url,
            max_depth = self.config.max_depth,
            "starting crawl"
        );

        let visitor = PageVisitor::new(self.renderer);
        self.frontier.push(self.config.base_url.clone(), 0);

        while let Some(item) = self.frontier.pop() {
            if self.is_cancelled() {
                info!(pages = self.results.len(), "crawl cancelled, returning partial results");
                break;
            }

            let canonical = urls::normalize(&item.url);
            if self.frontier.is_visited(&canonical) {
                continue;
            }

            if item.depth > self.config.max_depth {
                // Still marked visited so the URL is never requeued. Strict
                // FIFO ordering guarantees shallower discoveries dequeue
                // first, so this can never shadow a within-bound visit.
                self.frontier.mark_visited(&canonical);
                continue;
            }

            self.frontier.mark_visited(&canonical);

            match visitor.visit(&canonical).await {
                Ok(links) => {
                    self.results.push(CrawlResult {
                        url: canonical.clone(),
                        depth: item.depth,
                        timestamp: chrono::Utc::now(),
                    });

                    if item.depth < self.config.max_depth {
                        for link in links {
                            if self.should_crawl(&link) {
                                self.frontier.push(urls::normalize(&link), item.depth + 1);
                            }
                        }
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(url = %canonical, error = %e, "failed to crawl page, skipping");
                }
            }

            if self.config.crawl_delay_ms > 0 {
                tokio::time::sleep(self.config.crawl_delay()).await;
            }

            info!(
                processed = self.frontier.visited_len(),
                estimated_total = self.frontier.visited_len() + self.frontier.queued_len(),
                url = %canonical,
                "crawl progress"
            );
        }

        info!(
            pages = self.results.len(),
            elapsed = ?started.elapsed(),
            "crawl completed"
        );
        Ok(self.results.clone())
    }

    /// The results accumulated so far
    pub fn results(&self) -> &[CrawlResult] {
        &self.results
    }

    /// Every canonical URL marked visited, including failed and
    /// depth-discarded ones
    pub fn visited_urls(&self) -> Vec<String> {
        self.frontier.visited_urls()
    }

    /// Eligibility policy for a discovered link: valid, same domain as the
    /// seed, allowed path, not excluded, and not already visited. Exclusion
    /// always overrides inclusion.
    fn should_crawl(&self, link: &str) -> bool {
        if !urls::is_valid_url(link) {
            return false;
        }
        if !urls::is_same_domain(link, &self.config.base_url) {
            return false;
        }
        if self.frontier.is_visited(&urls::normalize(link)) {
            return false;
        }
        if !urls::is_allowed_path(link, &self.config.allowed_paths) {
            return false;
        }
        if urls::is_excluded_path(link, &self.config.excluded_paths) {
            return false;
        }
        true
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::SeqCst))
    }
}

/// Crawl a site in one shot and return the visited pages
pub async fn crawl_site<R: Renderer>(
    renderer: &R,
    config: SiteConfig,
) -> Result<Vec<CrawlResult>, CrawlError> {
    let mut crawler = Crawler::new(renderer, config);
    crawler.crawl().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{MockRenderer, MockSession, RendererError};

    fn site(max_depth: u32) -> SiteConfig {
        SiteConfig::builder("test", "https://s.test/")
            .max_depth(max_depth)
            .build()
    }

    fn depths(results: &[CrawlResult]) -> Vec<(&str, u32)> {
        results
            .iter()
            .map(|result| (result.url.as_str(), result.depth))
            .collect()
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        // seed "/" links to "/a" and "/private/b"; "/a" links to "/a/1" and
        // back to "/". With maxDepth=2 and "/private" denied, the crawl
        // visits exactly "/", "/a", "/a/1" at depths 0, 1, 2.
        let renderer = MockRenderer::new();
        renderer
            .add_page(
                "https://s.test/",
                &["https://s.test/a", "https://s.test/private/b"],
            )
            .await;
        renderer
            .add_page("https://s.test/a", &["https://s.test/a/1", "https://s.test/"])
            .await;
        renderer.add_page("https://s.test/a/1", &[]).await;

        let config = SiteConfig::builder("test", "https://s.test/")
            .max_depth(2)
            .allowed_paths(vec!["/".to_string()])
            .excluded_paths(vec!["/private".to_string()])
            .build();

        let results = crawl_site(&renderer, config).await.unwrap();

        assert_eq!(
            depths(&results),
            vec![("https://s.test/", 0), ("https://s.test/a", 1), ("https://s.test/a/1", 2)]
        );

        let loaded = renderer.loaded_urls().await;
        assert!(!loaded.iter().any(|url| url.contains("/private")));
        // "/" is never revisited from the link back on "/a"
        assert_eq!(loaded.iter().filter(|url| *url == "https://s.test/").count(), 1);
    }

    #[tokio::test]
    async fn test_depth_bound() {
        // seed -> A -> B; with maxDepth=1 B is never visited
        let renderer = MockRenderer::new();
        renderer.add_page("https://s.test/", &["https://s.test/a"]).await;
        renderer.add_page("https://s.test/a", &["https://s.test/b"]).await;
        renderer.add_page("https://s.test/b", &[]).await;

        let results = crawl_site(&renderer, site(1)).await.unwrap();

        assert_eq!(
            depths(&results),
            vec![("https://s.test/", 0), ("https://s.test/a", 1)]
        );
    }

    #[tokio::test]
    async fn test_no_duplicate_results_across_discovery_paths() {
        // "/shared" is discovered from both "/x" and "/y" but visited once
        let renderer = MockRenderer::new();
        renderer
            .add_page("https://s.test/", &["https://s.test/x", "https://s.test/y"])
            .await;
        renderer.add_page("https://s.test/x", &["https://s.test/shared"]).await;
        renderer.add_page("https://s.test/y", &["https://s.test/shared/"]).await;
        renderer.add_page("https://s.test/shared", &[]).await;

        let results = crawl_site(&renderer, site(2)).await.unwrap();

        let shared_count = results
            .iter()
            .filter(|result| result.url == "https://s.test/shared")
            .count();
        assert_eq!(shared_count, 1);
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_exclusion_overrides_inclusion() {
        let renderer = MockRenderer::new();
        renderer
            .add_page("https://s.test/", &["https://s.test/admin/x", "https://s.test/docs"])
            .await;
        renderer.add_page("https://s.test/docs", &[]).await;
        renderer.add_page("https://s.test/admin/x", &[]).await;

        let config = SiteConfig::builder("test", "https://s.test/")
            .max_depth(1)
            .allowed_paths(vec!["/".to_string()])
            .excluded_paths(vec!["/admin".to_string()])
            .build();

        let results = crawl_site(&renderer, config).await.unwrap();

        assert_eq!(
            depths(&results),
            vec![("https://s.test/", 0), ("https://s.test/docs", 1)]
        );
    }

    #[tokio::test]
    async fn test_offsite_links_are_not_followed() {
        let renderer = MockRenderer::new();
        renderer
            .add_page(
                "https://s.test/",
                &["https://other.test/page", "https://s.test/local"],
            )
            .await;
        renderer.add_page("https://s.test/local", &[]).await;

        let results = crawl_site(&renderer, site(1)).await.unwrap();

        assert_eq!(
            depths(&results),
            vec![("https://s.test/", 0), ("https://s.test/local", 1)]
        );
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        // second of three pages fails; first and third still appear and the
        // run terminates normally
        let renderer = MockRenderer::new();
        renderer
            .add_page(
                "https://s.test/",
                &["https://s.test/broken", "https://s.test/fine"],
            )
            .await;
        renderer.add_page("https://s.test/fine", &[]).await;
        renderer.fail_navigation("https://s.test/broken").await;

        let results = crawl_site(&renderer, site(1)).await.unwrap();

        assert_eq!(
            depths(&results),
            vec![("https://s.test/", 0), ("https://s.test/fine", 1)]
        );
        // the failed URL was attempted once and is not retried
        let loaded = renderer.loaded_urls().await;
        assert_eq!(
            loaded.iter().filter(|url| *url == "https://s.test/broken").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_url_counts_as_visited() {
        let renderer = MockRenderer::new();
        renderer.add_page("https://s.test/", &["https://s.test/broken"]).await;
        renderer.fail_navigation("https://s.test/broken").await;

        let mut crawler = Crawler::new(&renderer, site(2));
        let results = crawler.crawl().await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(crawler.visited_urls().contains(&"https://s.test/broken".to_string()));
    }

    #[tokio::test]
    async fn test_acquisition_failure_aborts_run() {
        let renderer = MockRenderer::new();
        renderer.fail_acquisition();

        let err = crawl_site(&renderer, site(1)).await.unwrap_err();
        assert!(matches!(err, CrawlError::Acquisition(_)));
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_crawl() {
        let renderer = MockRenderer::new();
        let config = SiteConfig::builder("test", "not a url").build();

        let err = crawl_site(&renderer, config).await.unwrap_err();
        assert!(matches!(err, CrawlError::Config(_)));
        assert!(renderer.loaded_urls().await.is_empty());
    }

    #[tokio::test]
    async fn test_shallower_discovery_wins_under_fifo() {
        // "/b" is reachable both directly from the seed (depth 1) and via
        // "/a" (depth 2). FIFO ordering dequeues the depth-1 discovery
        // first, so "/b" is recorded at depth 1.
        let renderer = MockRenderer::new();
        renderer
            .add_page("https://s.test/", &["https://s.test/a", "https://s.test/b"])
            .await;
        renderer.add_page("https://s.test/a", &["https://s.test/b"]).await;
        renderer.add_page("https://s.test/b", &[]).await;

        let results = crawl_site(&renderer, site(2)).await.unwrap();

        let b = results
            .iter()
            .find(|result| result.url == "https://s.test/b")
            .unwrap();
        assert_eq!(b.depth, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_politeness_delay_between_visits() {
        let renderer = MockRenderer::new();
        renderer
            .add_page("https://s.test/", &["https://s.test/a", "https://s.test/b"])
            .await;
        renderer.add_page("https://s.test/a", &[]).await;
        renderer.add_page("https://s.test/b", &[]).await;

        let config = SiteConfig::builder("test", "https://s.test/")
            .max_depth(1)
            .crawl_delay_ms(500)
            .build();

        let started = tokio::time::Instant::now();
        let results = crawl_site(&renderer, config).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 3);
        // at least visits - 1 delay windows between 3 sequential visits
        assert!(elapsed >= std::time::Duration::from_millis(1000), "elapsed {elapsed:?}");
    }

    // Renderer wrapper that trips a cancellation flag once the first session
    // has been opened, so exactly one page is processed before the flag is
    // observed between iterations.
    struct CancelAfterFirstOpen {
        inner: MockRenderer,
        cancel: Arc<AtomicBool>,
    }

    impl Renderer for CancelAfterFirstOpen {
        type Session = MockSession;

        async fn open_session(&self) -> Result<MockSession, RendererError> {
            let session = self.inner.open_session().await?;
            self.cancel.store(true, Ordering::SeqCst);
            Ok(session)
        }
    }

    #[tokio::test]
    async fn test_cancellation_returns_partial_results() {
        let inner = MockRenderer::new();
        inner
            .add_page("https://s.test/", &["https://s.test/a", "https://s.test/b"])
            .await;
        inner.add_page("https://s.test/a", &[]).await;
        inner.add_page("https://s.test/b", &[]).await;

        let cancel = Arc::new(AtomicBool::new(false));
        let renderer = CancelAfterFirstOpen {
            inner,
            cancel: Arc::clone(&cancel),
        };

        let mut crawler = Crawler::new(&renderer, site(1)).with_cancel_flag(Arc::clone(&cancel));
        let results = crawler.crawl().await.unwrap();

        // the seed was processed, the queued children were not
        assert_eq!(depths(&results), vec![("https://s.test/", 0)]);
    }
}
