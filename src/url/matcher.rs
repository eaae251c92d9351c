/// Checks if a host matches a domain pattern
///
/// `"example.com"` matches only that host; `"*.example.com"` matches the bare
/// domain and any subdomain of it.
///
/// ```
/// use service_scout::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.yelp.com", "www.yelp.com"));
/// assert!(matches_wildcard("*.yelp.com", "yelp.com"));
/// assert!(!matches_wildcard("yelp.com", "m.yelp.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// Returns true if the host matches any denylist pattern
pub fn is_denied_host(host: &str, denylist: &[String]) -> bool {
    let host = host.to_lowercase();
    denylist
        .iter()
        .any(|pattern| matches_wildcard(&pattern.to_lowercase(), &host))
}
