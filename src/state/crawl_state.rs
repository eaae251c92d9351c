use crate::url::{extract_domain, visit_key};
use std::collections::HashSet;
use url::Url;

/// Per-crawl traversal state
///
/// Created for one seed URL and never shared with another crawl. A URL is
/// recorded in `visited` at most once; the coordinator fetches only URLs it
/// has just successfully marked.
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    order: Vec<String>,
    depth_budget: u32,
    domain: String,
}

impl CrawlState {
    /// Creates the state for a crawl rooted at `seed`
    pub fn new(seed: &Url, depth_budget: u32) -> Self {
        Self {
            visited: HashSet::new(),
            order: Vec::new(),
            depth_budget,
            domain: extract_domain(seed).unwrap_or_default(),
        }
    }

    /// Marks a URL as visited
    ///
    /// Returns false if it had already been visited, in which case the caller
    /// must not fetch it.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let key = visit_key(url);
        if self.visited.contains(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.visited.insert(key)
    }

    /// Returns true if the URL has already been visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&visit_key(url))
    }

    /// Returns true if a page at `depth` may be fetched
    pub fn within_budget(&self, depth: u32) -> bool {
        depth <= self.depth_budget
    }

    /// Returns true if links found at `depth` may still be followed
    pub fn can_expand(&self, depth: u32) -> bool {
        depth < self.depth_budget
    }

    /// Lowercase host of the seed URL
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn depth_budget(&self) -> u32 {
        self.depth_budget
    }

    /// Number of distinct URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Visited URLs in the order they were marked
    pub fn visited_in_order(&self) -> &[String] {
        &self.order
    }
}
