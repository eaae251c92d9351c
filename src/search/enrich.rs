//! Market context for a physician group
//!
//! Every lookup goes through the shared [`SearchProvider`]. A failed query is
//! logged and leaves its part of the result empty; it never fails the row.

use super::client::{SearchProvider, SearchResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const SOCIAL_PLATFORMS: &[&str] = &["facebook", "instagram", "twitter", "linkedin", "youtube"];

pub const REVIEW_PLATFORMS: &[&str] = &["yelp", "healthgrades", "vitals", "zocdoc", "google reviews"];

/// Competitor links on these hosts are directory pages, not practices
const DIRECTORY_SITES: &[&str] = &["facebook.com", "linkedin.com", "yelp.com"];

const MAX_COMPETITORS: usize = 5;

static POPULATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)population[:\s]*([\d,]+)").expect("population pattern is valid"));

static MEDIAN_INCOME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)median income[:\s]*\$?([\d,]+)").expect("median income pattern is valid")
});

/// A group's page on a social or review platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformListing {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl From<&SearchResult> for PlatformListing {
    fn from(result: &SearchResult) -> Self {
        Self {
            url: result.link.clone(),
            title: result.title.clone(),
            snippet: result.snippet.clone(),
        }
    }
}

/// Another practice in the same area
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub url: String,
    pub snippet: String,
}

/// Address breakdown and local demographics; unknown values are empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    pub full_address: String,
    pub city: String,
    pub state: String,
    pub population: String,
    pub median_income: String,
}

/// Everything the enricher found for one row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub social_media_presence: BTreeMap<String, PlatformListing>,
    pub patient_reviews: BTreeMap<String, PlatformListing>,
    pub competitors: Vec<Competitor>,
    pub location_data: LocationData,
}

/// Runs the enrichment lookups
pub struct Enricher {
    provider: Arc<dyn SearchProvider>,
    pause: Duration,
}

impl Enricher {
    /// `pause` is slept between consecutive platform queries
    pub fn new(provider: Arc<dyn SearchProvider>, pause: Duration) -> Self {
        Self { provider, pause }
    }

    pub async fn enrich(&self, group_name: &str, address: &str) -> Enrichment {
        tracing::info!("Extracting social media presence...");
        let social_media_presence = self.social_media_presence(group_name, address).await;

        tracing::info!("Extracting patient reviews...");
        let patient_reviews = self.patient_reviews(group_name, address).await;

        tracing::info!("Extracting competitors...");
        let competitors = self.competitors(group_name, address).await;

        tracing::info!("Extracting location data...");
        let location_data = self.location_data(address).await;

        Enrichment {
            social_media_presence,
            patient_reviews,
            competitors,
            location_data,
        }
    }

    /// First result per social platform whose link mentions the platform
    pub async fn social_media_presence(
        &self,
        group_name: &str,
        address: &str,
    ) -> BTreeMap<String, PlatformListing> {
        let mut found = BTreeMap::new();
        for (i, platform) in SOCIAL_PLATFORMS.iter().enumerate() {
            self.pause_between(i).await;
            let query = format!("{group_name} {address} {platform}");
            if let Some(listing) = self.platform_listing(&query, platform).await {
                found.insert(platform.to_string(), listing);
            }
        }
        found
    }

    /// First result per review platform whose link mentions the platform
    ///
    /// Multi-word platforms are matched with their spaces removed, so
    /// "google reviews" matches a link containing "googlereviews".
    pub async fn patient_reviews(
        &self,
        group_name: &str,
        address: &str,
    ) -> BTreeMap<String, PlatformListing> {
        let mut found = BTreeMap::new();
        for (i, platform) in REVIEW_PLATFORMS.iter().enumerate() {
            self.pause_between(i).await;
            let query = format!("{group_name} {address} {platform} reviews");
            let needle = platform.replace(' ', "");
            if let Some(listing) = self.platform_listing(&query, &needle).await {
                found.insert(platform.to_string(), listing);
            }
        }
        found
    }

    /// Up to five other eye-care practices near the address
    pub async fn competitors(&self, group_name: &str, address: &str) -> Vec<Competitor> {
        let area = match city_state(address) {
            Some((city, state)) => format!("{city}, {state}"),
            None => address.to_string(),
        };
        let query = format!("eye care optometry ophthalmology {area}");

        let results = match self.provider.search(&query, 10).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Error searching for competitors: {}", e);
                return Vec::new();
            }
        };

        let own_name = group_name.to_lowercase();
        results
            .iter()
            .filter(|r| !r.title.to_lowercase().contains(&own_name))
            .filter(|r| !DIRECTORY_SITES.iter().any(|site| r.link.contains(site)))
            .take(MAX_COMPETITORS)
            .map(|r| Competitor {
                name: r.title.clone(),
                url: r.link.clone(),
                snippet: r.snippet.clone(),
            })
            .collect()
    }

    /// City and state from the address, plus population and income when found
    pub async fn location_data(&self, address: &str) -> LocationData {
        let mut data = LocationData {
            full_address: address.to_string(),
            ..Default::default()
        };

        let Some((city, state)) = city_state(address) else {
            return data;
        };
        data.city = city;
        data.state = state;

        if data.city.is_empty() || data.state.is_empty() {
            return data;
        }

        let query = format!("{} {} population median income", data.city, data.state);
        match self.provider.search(&query, 3).await {
            Ok(results) => {
                if let Some(first) = results.first() {
                    let (population, income) = parse_location_snippet(&first.snippet);
                    data.population = population.unwrap_or_default();
                    data.median_income = income.unwrap_or_default();
                }
            }
            Err(e) => tracing::warn!("Error extracting location data: {}", e),
        }

        data
    }

    async fn platform_listing(&self, query: &str, needle: &str) -> Option<PlatformListing> {
        match self.provider.search(query, 3).await {
            Ok(results) => results
                .iter()
                .find(|r| r.link.to_lowercase().contains(needle))
                .map(PlatformListing::from),
            Err(e) => {
                tracing::warn!("Error searching for {}: {}", needle, e);
                None
            }
        }
    }

    async fn pause_between(&self, index: usize) {
        if index > 0 && !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// Last two comma-separated parts of an address, trimmed
pub fn city_state(address: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = address.split(',').collect();
    match parts.as_slice() {
        [.., city, state] => Some((city.trim().to_string(), state.trim().to_string())),
        _ => None,
    }
}

/// Extracts population and median income figures from a search snippet
///
/// Income is returned with a leading `$`.
pub fn parse_location_snippet(snippet: &str) -> (Option<String>, Option<String>) {
    let capture = |pattern: &Regex| {
        pattern
            .captures(snippet)?
            .get(1)
            .map(|m| m.as_str().to_string())
    };

    let population = capture(&POPULATION);
    let income = capture(&MEDIAN_INCOME).map(|n| format!("${n}"));
    (population, income)
}
