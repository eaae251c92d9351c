//! Web search collaborators
//!
//! - `client`: the [`SearchProvider`] seam and the SerpApi implementation
//! - `resolver`: finds a physician group's official website
//! - `enrich`: social, review, competitor and location lookups

mod client;
mod enrich;
mod resolver;

pub use client::{SearchProvider, SearchResult, SerpApiClient};
pub use enrich::{
    city_state, parse_location_snippet, Competitor, Enricher, Enrichment, LocationData,
    PlatformListing, REVIEW_PLATFORMS, SOCIAL_PLATFORMS,
};
pub use resolver::{pick_website, website_query, SiteResolver};
