//! Crawler module for fetching and walking practice websites
//!
//! This module contains:
//! - The `PageFetcher` seam with a direct HTTP implementation
//! - A headless-browser fetcher (feature `browser`)
//! - Link discovery
//! - The bounded-depth crawl coordinator

#[cfg(feature = "browser")]
mod browser;
mod coordinator;
mod fetcher;
mod links;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use coordinator::{CrawlOptions, CrawlReport, SiteCrawler};
pub use fetcher::{build_http_client, FetchFailure, HttpFetcher, PageContent, PageFetcher};
pub use links::{extract_links, extract_nav_links, NavLink};
