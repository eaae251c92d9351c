use super::client::{SearchProvider, SearchResult};
use crate::config::SearchConfig;
use crate::url::is_denied_host;
use std::sync::Arc;
use url::Url;

/// Finds the official website of a physician group
pub struct SiteResolver {
    provider: Option<Arc<dyn SearchProvider>>,
    num_results: u32,
    denylist: Vec<String>,
}

impl SiteResolver {
    /// Without a provider every lookup yields `None`
    pub fn new(provider: Option<Arc<dyn SearchProvider>>, config: &SearchConfig) -> Self {
        Self {
            provider,
            num_results: config.num_results,
            denylist: config.denylist.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns the first acceptable result URL, or `None`
    ///
    /// Search errors are logged and treated as "not found".
    pub async fn resolve(&self, group_name: &str, physician_name: &str, address: &str) -> Option<Url> {
        let Some(provider) = &self.provider else {
            tracing::error!("No search API key available, cannot look up websites");
            return None;
        };

        let query = website_query(group_name, physician_name, address);
        tracing::info!("Searching for website with query: {}", query);

        match provider.search(&query, self.num_results).await {
            Ok(results) => {
                let website = pick_website(&results, &self.denylist);
                match &website {
                    Some(url) => tracing::info!("Found website: {}", url),
                    None => tracing::warn!("No suitable website in {} results", results.len()),
                }
                website
            }
            Err(e) => {
                tracing::error!("Website search failed for {}: {}", group_name, e);
                None
            }
        }
    }
}

pub fn website_query(group_name: &str, physician_name: &str, address: &str) -> String {
    format!("{group_name} {physician_name} {address} official website")
}

/// First result that is an HTTP(S) URL on a host outside the denylist
pub fn pick_website(results: &[SearchResult], denylist: &[String]) -> Option<Url> {
    results.iter().find_map(|result| {
        let url = Url::parse(result.link.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let host = url.host_str()?;
        (!is_denied_host(host, denylist)).then_some(url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn hit(link: &str) -> SearchResult {
        SearchResult {
            link: link.to_string(),
            ..Default::default()
        }
    }

    struct FixedProvider {
        results: Vec<SearchResult>,
        queries: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchResult>> {
            self.queries.lock().unwrap().push((query.to_string(), num));
            Ok(self.results.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SearchProvider for FailingProvider {
        async fn search(&self, _query: &str, _num: u32) -> Result<Vec<SearchResult>> {
            Err(crate::ScoutError::Search("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_pick_skips_denied_and_invalid() {
        let denylist = SearchConfig::default().denylist;
        let results = vec![
            hit("https://www.facebook.com/brighteyes"),
            hit("not a url"),
            hit("ftp://files.brighteyes.com/"),
            hit("https://m.yelp.com/biz/bright-eyes"),
            hit("https://www.brighteyes.com/"),
            hit("https://second.example.com/"),
        ];
        let picked = pick_website(&results, &denylist).unwrap();
        assert_eq!(picked.as_str(), "https://www.brighteyes.com/");
    }

    #[test]
    fn test_pick_none_when_all_denied() {
        let denylist = SearchConfig::default().denylist;
        let results = vec![hit("https://zocdoc.com/doctor/1"), hit("https://vitals.com/x")];
        assert!(pick_website(&results, &denylist).is_none());
    }

    #[test]
    fn test_query_format() {
        assert_eq!(
            website_query("Bright Eyes", "Bright Eyes", "1 Main St, Austin, TX"),
            "Bright Eyes Bright Eyes 1 Main St, Austin, TX official website"
        );
    }

    #[tokio::test]
    async fn test_resolve_uses_configured_result_count() {
        let provider = Arc::new(FixedProvider {
            results: vec![hit("https://brighteyes.com/")],
            queries: Mutex::new(Vec::new()),
        });
        let resolver = SiteResolver::new(Some(provider.clone()), &SearchConfig::default());

        let url = resolver.resolve("Bright Eyes", "Bright Eyes", "Austin, TX").await;

        assert_eq!(url.unwrap().as_str(), "https://brighteyes.com/");
        let queries = provider.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].1, 5);
    }

    #[tokio::test]
    async fn test_resolve_without_provider() {
        let resolver = SiteResolver::new(None, &SearchConfig::default());
        assert!(!resolver.is_enabled());
        assert!(resolver.resolve("A", "A", "B").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_provider_error_is_none() {
        let resolver = SiteResolver::new(Some(Arc::new(FailingProvider)), &SearchConfig::default());
        assert!(resolver.resolve("A", "A", "B").await.is_none());
    }
}
