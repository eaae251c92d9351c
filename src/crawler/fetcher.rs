//! Page fetching
//!
//! This module defines the [`PageFetcher`] seam used by the crawl
//! coordinator, and the direct-request implementation:
//! - Building an HTTP client with a browser-like user agent
//! - GET requests with a bounded timeout and followed redirects
//! - Classifying failures into [`FetchFailure`]

use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a single page could not be fetched
///
/// Failures are local to one URL; the crawl continues without that branch.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {error}")]
    Network { url: String, error: String },

    #[error("Timed out fetching {url}")]
    Timeout { url: String },

    #[error("Unsupported content type {content_type:?} for {url}")]
    UnsupportedContent { url: String, content_type: String },

    #[error("Render error for {url}: {error}")]
    Render { url: String, error: String },
}

/// A fetched page
///
/// Holds the markup rather than a parsed tree; the tree is built on demand
/// with [`PageContent::document`] and dropped once the page is processed.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL after redirects
    pub url: Url,

    /// Raw markup
    pub html: String,

    /// True if scripts were executed before capture
    pub rendered: bool,
}

impl PageContent {
    pub fn new(url: Url, html: impl Into<String>, rendered: bool) -> Self {
        Self {
            url,
            html: html.into(),
            rendered,
        }
    }

    /// Parses the markup
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Retrieves one page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchFailure>;

    /// True if pages come back after script execution
    fn renders(&self) -> bool {
        false
    }
}

/// Builds the HTTP client used for direct fetches
///
/// Redirects are followed up to ten hops. The same client is reused for the
/// whole run.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Direct GET fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_markup(&content_type) {
            return Err(FetchFailure::UnsupportedContent {
                url: url.to_string(),
                content_type,
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(PageContent::new(final_url, body, false))
    }
}

/// Accepts any text type and XHTML; a missing header is treated as HTML
fn is_markup(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html")
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchFailure::Network {
            url: url.to_string(),
            error: "Connection refused".to_string(),
        }
    } else {
        FetchFailure::Network {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_is_markup() {
        assert!(is_markup("text/html; charset=utf-8"));
        assert!(is_markup("TEXT/HTML"));
        assert!(is_markup("application/xhtml+xml"));
        assert!(is_markup("text/plain"));
        assert!(is_markup(""));
        assert!(!is_markup("application/pdf"));
        assert!(!is_markup("image/png"));
        assert!(!is_markup("application/json"));
    }

    #[test]
    fn test_page_content_document() {
        let page = PageContent::new(
            Url::parse("https://example.com/").unwrap(),
            "<html><body><h1>Retina Care</h1></body></html>",
            false,
        );
        let selector = scraper::Selector::parse("h1").unwrap();
        let document = page.document();
        let h1 = document.select(&selector).next().unwrap();
        assert_eq!(h1.text().collect::<String>(), "Retina Care");
    }

    #[test]
    fn test_failure_messages() {
        let failure = FetchFailure::Status {
            url: "https://example.com/x".to_string(),
            status: 404,
        };
        assert_eq!(failure.to_string(), "HTTP 404 for https://example.com/x");
    }
}
