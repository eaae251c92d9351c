//! Service-Scout: physician group service harvester
//!
//! This crate resolves the official website of each physician group in an input
//! table, crawls the site to a bounded depth and classifies page text into a set
//! of offered services. An enrichment mode also looks up social media, review
//! listings, competitors and local demographics for the same address.

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod search;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Service-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Search API error: {0}")]
    Search(String),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Input error: {0}")]
    Load(#[from] LoadError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Input table errors; any of these aborts the whole run
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Input file has no worksheet or header row")]
    Empty,

    #[error("Missing required columns {missing:?} (available: {available:?})")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Result type alias for Service-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

pub use classifier::{Candidate, Classifier, Lexicon, Strategy};
pub use config::Config;
pub use crawler::{FetchFailure, PageContent, PageFetcher, SiteCrawler};
pub use output::OutputRecord;
pub use state::{CrawlState, ServiceSet};
pub use url::{extract_domain, is_same_domain, normalize_url};
