//! State owned by a single crawl
//!
//! - `CrawlState`: visited set, depth budget and seed domain for one crawl
//! - `ServiceSet`: insertion-ordered, deduplicated service names

mod crawl_state;
mod service_set;

pub use crawl_state::CrawlState;
pub use service_set::ServiceSet;
