use serde::Deserialize;

/// Desktop browser identification sent with every direct fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Service-Scout
///
/// Every section and field has a default, so an empty file (or no file at
/// all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub keywords: KeywordConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of link hops from the seed URL
    pub max_depth: u32,

    /// Timeout for a direct GET request (seconds)
    pub request_timeout_secs: u64,

    /// How long the browser fetcher waits for `body` (seconds)
    pub render_timeout_secs: u64,

    /// User-Agent header for direct fetches and the headless browser
    pub user_agent: String,

    /// Pause between input rows (milliseconds)
    pub row_delay_ms: u64,

    /// Pause between input rows when enrichment is enabled (milliseconds)
    pub enrich_row_delay_ms: u64,

    /// A discovered link is followed only if its URL contains one of these
    pub link_keywords: Vec<String>,

    /// Navigation links whose text contains one of these are side-visited
    pub nav_keywords: Vec<String>,

    /// Side-visit service links in navigation menus.
    /// Unset means "only when pages are browser-rendered".
    pub nav_side_visits: Option<bool>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            request_timeout_secs: 10,
            render_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            row_delay_ms: 2000,
            enrich_row_delay_ms: 3000,
            link_keywords: strings(&[
                "service",
                "treat",
                "care",
                "specialty",
                "procedure",
                "therapy",
            ]),
            nav_keywords: strings(&["service", "care", "treat", "specialty", "procedure"]),
            nav_side_visits: None,
        }
    }
}

/// Search API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Search endpoint returning `organic_results`
    pub endpoint: String,

    /// Explicit API key; takes precedence over the environment variable
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Results requested when resolving a website
    pub num_results: u32,

    /// Result hosts that are never taken as a practice website
    pub denylist: Vec<String>,

    /// Pause between enrichment platform queries (milliseconds)
    pub platform_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search.json".to_string(),
            api_key: None,
            api_key_env: "SERP_API_KEY".to_string(),
            num_results: 5,
            denylist: strings(&[
                "*.facebook.com",
                "*.linkedin.com",
                "*.yelp.com",
                "*.healthgrades.com",
                "*.vitals.com",
                "*.zocdoc.com",
            ]),
            platform_delay_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving one JSON file per physician group
    pub directory: String,

    /// Pretty-print JSON records
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            pretty: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log file written alongside console output; unset disables it
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some("scraper.log".to_string()),
        }
    }
}

/// Classifier lexicons
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KeywordConfig {
    /// Terms that make a string look like a medical service
    pub include: Vec<String>,

    /// Administrative or irrelevant phrases; always win over `include`
    pub exclude: Vec<String>,

    /// Generic words that disqualify a heading on its own
    pub self_referential: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            include: strings(&[
                "care",
                "treatment",
                "therapy",
                "procedure",
                "service",
                "specialty",
                "surgery",
                "consultation",
                "exam",
                "screening",
                "test",
                "imaging",
                "ophthalmology",
                "optometry",
                "vision",
                "eye",
                "retina",
                "glaucoma",
                "cataract",
                "lasik",
                "contact lens",
                "glasses",
                "frames",
            ]),
            exclude: strings(&[
                "insurance",
                "coverage",
                "billing",
                "payment",
                "cost",
                "price",
                "why am i",
                "what is",
                "how to",
                "when should",
                "can i",
                "frequently asked",
                "faq",
                "privacy policy",
                "terms of service",
                "contact us",
                "about us",
                "hours",
                "location",
                "directions",
                "testimonial",
                "review",
                "rating",
                "star",
                "facebook",
                "instagram",
                "twitter",
                "linkedin",
                "youtube",
                "yelp",
                "healthgrades",
                "blue cross",
                "blue shield",
                "anthem",
                "humana",
                "cigna",
                "aetna",
            ]),
            self_referential: strings(&["our", "we", "about", "contact"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
