use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use service_scout::url::extract_domain;
///
/// let url = Url::parse("https://EyeCare.Example.com/services").unwrap();
/// assert_eq!(extract_domain(&url), Some("eyecare.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs share the same host
///
/// Hosts are compared exactly (after lowercasing): `www.example.com` and
/// `example.com` are different sites for the crawler.
pub fn is_same_domain(candidate: &Url, seed: &Url) -> bool {
    match (extract_domain(candidate), extract_domain(seed)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
