use crate::config::types::{Config, SearchConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Loaded configuration, defaults filled in
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the file when one is given, otherwise returns the defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Resolves the search API key
///
/// The explicit `api-key` setting wins; otherwise the variable named by
/// `api-key-env` is read. Blank values count as missing.
pub fn resolve_api_key(search: &SearchConfig) -> Option<String> {
    search
        .api_key
        .clone()
        .or_else(|| std::env::var(&search.api_key_env).ok())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
