//! URL list persistence
//!
//! The crawler's sink: saves discovered URLs to a plain text file, one
//! canonical URL per line, and loads URL lists back for downstream capture
//! tooling. Lines starting with `#` are treated as comments when loading.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::crawler::CrawlResult;
use crate::error::Result;

/// Extract the URL list from crawl results, preserving crawl order
pub fn urls_from_crawl(results: &[CrawlResult]) -> Vec<String> {
    results.iter().map(|result| result.url.clone()).collect()
}

/// Save URLs to a file, one per line, creating parent directories as needed
pub async fn save_urls_to_file(urls: &[String], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut content = urls.join("\n");
    content.push('\n');
    fs::write(path, content).await?;

    debug!(count = urls.len(), path = %path.display(), "saved URL list");
    Ok(())
}

/// Load a URL list from a file, skipping blank lines and `#` comments
pub async fn load_urls_from_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref()).await?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}

/// Save crawl results as a plain URL list
pub async fn save_crawl_results(results: &[CrawlResult], path: impl AsRef<Path>) -> Result<()> {
    let urls = urls_from_crawl(results);
    save_urls_to_file(&urls, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(url: &str, depth: u32) -> CrawlResult {
        CrawlResult {
            url: url.to_string(),
            depth,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_urls_from_crawl_preserves_order() {
        let results = vec![
            result("https://s.test/", 0),
            result("https://s.test/a", 1),
            result("https://s.test/a/1", 2),
        ];

        assert_eq!(
            urls_from_crawl(&results),
            vec!["https://s.test/", "https://s.test/a", "https://s.test/a/1"]
        );
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("urls.txt");

        let results = vec![result("https://s.test/", 0), result("https://s.test/a", 1)];
        save_crawl_results(&results, &path).await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "https://s.test/\nhttps://s.test/a\n");

        let loaded = load_urls_from_file(&path).await.unwrap();
        assert_eq!(loaded, vec!["https://s.test/", "https://s.test/a"]);
    }

    #[tokio::test]
    async fn test_load_skips_comments_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        fs::write(&path, "# seed list\nhttps://s.test/\n\n  https://s.test/a  \n")
            .await
            .unwrap();

        let loaded = load_urls_from_file(&path).await.unwrap();
        assert_eq!(loaded, vec!["https://s.test/", "https://s.test/a"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let missing = Path::new("/nonexistent/urls.txt");
        assert!(load_urls_from_file(missing).await.is_err());
    }
}
