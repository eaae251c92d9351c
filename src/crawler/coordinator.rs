//! Crawl coordination for a single practice website
//!
//! The coordinator walks a site depth-first from the seed URL:
//! - Each URL is fetched at most once per crawl
//! - Pages deeper than the depth budget are never fetched
//! - Only links on the seed's host whose URL looks service related are followed
//! - Service-looking navigation links can be side-visited eagerly
//!
//! The traversal uses an explicit worklist; children are pushed in reverse so
//! pages are visited in the same pre-order a recursive walk would produce.

use super::fetcher::{PageContent, PageFetcher};
use super::links::{extract_links, extract_nav_links};
use crate::classifier::Classifier;
use crate::config::CrawlerConfig;
use crate::state::{CrawlState, ServiceSet};
use crate::url::is_same_domain;
use url::Url;

/// Link-following rules for one crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// A link is followed only if its lowercased URL contains one of these
    pub link_keywords: Vec<String>,

    /// Navigation links whose text contains one of these are side-visited
    pub nav_keywords: Vec<String>,

    /// Whether side-visits happen at all
    pub nav_side_visits: bool,
}

impl CrawlOptions {
    /// Options from the crawler configuration
    ///
    /// When `nav-side-visits` is unset, side-visits follow the fetcher: on for
    /// rendered pages, off for direct fetches.
    pub fn from_config(config: &CrawlerConfig, rendering: bool) -> Self {
        Self {
            link_keywords: lowered(&config.link_keywords),
            nav_keywords: lowered(&config.nav_keywords),
            nav_side_visits: config.nav_side_visits.unwrap_or(rendering),
        }
    }

    fn is_relevant_link(&self, url: &Url) -> bool {
        let lowered = url.as_str().to_lowercase();
        self.link_keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }

    fn is_service_nav_text(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.nav_keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default(), false)
    }
}

/// Result of one crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub services: ServiceSet,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub state: CrawlState,
}

/// What one fetched page contributes
struct PageAnalysis {
    services: ServiceSet,
    nav_targets: Vec<Url>,
    children: Vec<Url>,
}

/// Bounded-depth crawler for a single site
pub struct SiteCrawler<'a> {
    fetcher: &'a dyn PageFetcher,
    classifier: &'a Classifier,
    options: CrawlOptions,
}

impl<'a> SiteCrawler<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, classifier: &'a Classifier, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            classifier,
            options,
        }
    }

    /// Crawls from `seed` and returns every accepted service in first-seen order
    ///
    /// Fetch failures only remove their own branch; this never fails.
    pub async fn crawl(&self, seed: &Url, max_depth: u32) -> ServiceSet {
        self.crawl_with_report(seed, max_depth).await.services
    }

    /// Like [`SiteCrawler::crawl`], also returning fetch counts and the visited set
    pub async fn crawl_with_report(&self, seed: &Url, max_depth: u32) -> CrawlReport {
        let mut state = CrawlState::new(seed, max_depth);
        let mut services = ServiceSet::new();
        let mut pages_fetched = 0;
        let mut pages_failed = 0;
        let mut worklist: Vec<(Url, u32)> = vec![(seed.clone(), 0)];

        tracing::info!("Crawling {} (max depth {})", seed, max_depth);

        while let Some((url, depth)) = worklist.pop() {
            if !state.within_budget(depth) || !state.mark_visited(&url) {
                continue;
            }

            let Some(page) = self.fetch(&url).await else {
                pages_failed += 1;
                continue;
            };
            pages_fetched += 1;

            let analysis = self.analyze(&page, &url, seed, &state);
            let added = services.union(&analysis.services);
            tracing::info!(
                "Depth {}: {} services on {} ({} new)",
                depth,
                analysis.services.len(),
                url,
                added
            );

            for target in analysis.nav_targets {
                if !state.mark_visited(&target) {
                    continue;
                }
                match self.fetch(&target).await {
                    Some(nav_page) => {
                        pages_fetched += 1;
                        let found = self.classifier.classify(&nav_page);
                        let added = services.union(&found);
                        tracing::debug!("Side-visit {}: {} new services", target, added);
                    }
                    None => pages_failed += 1,
                }
            }

            if state.can_expand(depth) {
                for child in analysis.children.into_iter().rev() {
                    if !state.is_visited(&child) {
                        worklist.push((child, depth + 1));
                    }
                }
            }
        }

        tracing::info!(
            "Crawl of {} finished: {} pages, {} failures, {} services",
            seed,
            pages_fetched,
            pages_failed,
            services.len()
        );

        CrawlReport {
            services,
            pages_fetched,
            pages_failed,
            state,
        }
    }

    async fn fetch(&self, url: &Url) -> Option<PageContent> {
        tracing::info!("Fetching {}", url);
        match self.fetcher.fetch(url).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Classifies a page and picks the links worth visiting
    ///
    /// Links are resolved against the requested URL, not the one a redirect
    /// ended on, so a seed that redirects to another host keeps its children.
    fn analyze(
        &self,
        page: &PageContent,
        requested: &Url,
        seed: &Url,
        state: &CrawlState,
    ) -> PageAnalysis {
        let document = page.document();
        let services = self.classifier.classify_document(&document, page.rendered);

        let nav_targets = if self.options.nav_side_visits {
            extract_nav_links(&document, requested)
                .into_iter()
                .filter(|link| self.options.is_service_nav_text(&link.text))
                .map(|link| link.url)
                .filter(|url| is_same_domain(url, seed) && !state.is_visited(url))
                .collect()
        } else {
            Vec::new()
        };

        let children = extract_links(&document, requested)
            .into_iter()
            .filter(|url| is_same_domain(url, seed))
            .filter(|url| self.options.is_relevant_link(url))
            .collect();

        PageAnalysis {
            services,
            nav_targets,
            children,
        }
    }
}

fn lowered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
