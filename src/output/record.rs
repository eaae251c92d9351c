use crate::search::{Competitor, Enrichment, LocationData, PlatformListing};
use crate::state::ServiceSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Result for one physician group, written once and never modified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub group_name: String,
    pub physician_name: String,
    pub address: String,
    pub website: String,

    /// Accepted services in first-seen order
    pub services: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_presence: Option<BTreeMap<String, PlatformListing>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_reviews: Option<BTreeMap<String, PlatformListing>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Vec<Competitor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_data: Option<LocationData>,

    pub scraped_at: DateTime<Utc>,
}

impl OutputRecord {
    pub fn new(
        group_name: &str,
        physician_name: &str,
        address: &str,
        website: &Url,
        services: ServiceSet,
    ) -> Self {
        Self {
            group_name: group_name.to_string(),
            physician_name: physician_name.to_string(),
            address: address.to_string(),
            website: website.to_string(),
            services: services.into_vec(),
            social_media_presence: None,
            patient_reviews: None,
            competitors: None,
            location_data: None,
            scraped_at: Utc::now(),
        }
    }

    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.social_media_presence = Some(enrichment.social_media_presence);
        self.patient_reviews = Some(enrichment.patient_reviews);
        self.competitors = Some(enrichment.competitors);
        self.location_data = Some(enrichment.location_data);
        self
    }

    pub fn is_enriched(&self) -> bool {
        self.social_media_presence.is_some()
            || self.patient_reviews.is_some()
            || self.competitors.is_some()
            || self.location_data.is_some()
    }
}
