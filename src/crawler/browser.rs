//! Headless Chromium fetcher
//!
//! One browser session per fetcher. Each fetch opens a tab, navigates, waits
//! for `body` to exist, captures the rendered markup and closes the tab.

use super::fetcher::{FetchFailure, PageContent, PageFetcher};
use crate::config::CrawlerConfig;
use crate::ScoutError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Fetches pages through a headless browser
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    render_timeout: Duration,
}

impl BrowserFetcher {
    /// Launches the browser session
    pub async fn launch(config: &CrawlerConfig) -> Result<Self, ScoutError> {
        let browser_config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg("--no-sandbox")
            .arg(format!("--user-agent={}", config.user_agent))
            .build()
            .map_err(ScoutError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScoutError::Browser(e.to_string()))?;

        // The CDP connection only makes progress while its handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!("Headless browser started");

        Ok(Self {
            browser,
            handler,
            render_timeout: Duration::from_secs(config.render_timeout_secs),
        })
    }

    /// Shuts the browser down
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }

    async fn render(&self, page: &Page, url: &Url) -> Result<String, FetchFailure> {
        let render_error = |e: chromiumoxide::error::CdpError| FetchFailure::Render {
            url: url.to_string(),
            error: e.to_string(),
        };

        let loaded = tokio::time::timeout(self.render_timeout, async {
            page.goto(url.as_str()).await?;
            page.find_element("body").await
        })
        .await;

        match loaded {
            Err(_) => Err(FetchFailure::Timeout {
                url: url.to_string(),
            }),
            Ok(Err(e)) => Err(render_error(e)),
            Ok(Ok(_)) => page.content().await.map_err(render_error),
        }
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<PageContent, FetchFailure> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchFailure::Render {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        let result = self.render(&page, url).await;

        let final_url = match page.url().await {
            Ok(Some(current)) => Url::parse(&current).unwrap_or_else(|_| url.clone()),
            _ => url.clone(),
        };

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close tab for {}: {}", url, e);
        }

        result.map(|html| PageContent::new(final_url, html, true))
    }

    fn renders(&self) -> bool {
        true
    }
}
