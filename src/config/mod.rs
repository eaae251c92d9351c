//! Configuration module for Service-Scout
//!
//! Loads, defaults and validates the optional TOML configuration file, and
//! resolves the search API key.
//!
//! # Example
//!
//! ```no_run
//! use service_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, KeywordConfig, LoggingConfig, OutputConfig, SearchConfig,
    DEFAULT_USER_AGENT,
};

pub use parser::{load_config, load_config_or_default, parse_config, resolve_api_key};
pub use validation::validate;
