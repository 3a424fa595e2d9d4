//! Crawl frontier: FIFO work queue plus visited-URL set
//!
//! The frontier owns traversal order and depth bookkeeping. Ordering is
//! strict FIFO, which makes the crawl breadth-first and deterministic given
//! deterministic link extraction order. Duplicates may transiently coexist
//! in the queue: there is no uniqueness check at push time, deduplication
//! happens against the visited set when items are dequeued. That keeps
//! pushes cheap and is an accepted trade-off, not a bug.

use std::collections::{HashSet, VecDeque};

/// A URL awaiting a visit, paired with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    /// The URL to visit
    pub url: String,

    /// Distance in accepted-link hops from the seed
    pub depth: u32,
}

/// The BFS work queue and visited set for one crawl run
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URL at the given depth to the back of the queue
    pub fn push(&mut self, url: impl Into<String>, depth: u32) {
        self.queue.push_back(FrontierItem {
            url: url.into(),
            depth,
        });
    }

    /// Remove and return the front item, or `None` when the queue is empty
    pub fn pop(&mut self) -> Option<FrontierItem> {
        self.queue.pop_front()
    }

    /// Add a canonical URL to the visited set; idempotent.
    ///
    /// Returns true iff the URL was not already visited.
    pub fn mark_visited(&mut self, canonical_url: &str) -> bool {
        self.visited.insert(canonical_url.to_string())
    }

    /// Whether a canonical URL has been visited
    pub fn is_visited(&self, canonical_url: &str) -> bool {
        self.visited.contains(canonical_url)
    }

    /// Number of items currently queued (duplicates included)
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct canonical URLs visited so far
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// The visited canonical URLs, in no particular order
    pub fn visited_urls(&self) -> Vec<String> {
        self.visited.iter().cloned().collect()
    }
}
