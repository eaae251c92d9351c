use crate::config::SearchConfig;
use crate::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// One organic search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// A web search backend
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a query and returns up to `num` organic results in rank order
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchResult>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
    #[serde(default)]
    error: Option<String>,
}

/// SerpApi JSON search client
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(client: Client, endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
        })
    }

    /// Builds a client when an API key is available
    pub fn from_config(
        client: Client,
        config: &SearchConfig,
        api_key: Option<String>,
    ) -> Result<Option<Self>> {
        match api_key {
            Some(key) => Ok(Some(Self::new(client, &config.endpoint, key)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchResult>> {
        tracing::debug!("Search query: {}", query);

        let num = num.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_default();
            return Err(ScoutError::Search(format!("HTTP {} {}", status.as_u16(), detail)));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            return Err(ScoutError::Search(error));
        }

        Ok(parsed.organic_results)
    }
}
