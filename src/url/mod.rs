//! URL handling for the crawler
//!
//! Normalization for the visited set, host extraction for the same-domain
//! restriction, and wildcard matching for the search denylist.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, is_same_domain};
pub use matcher::{is_denied_host, matches_wildcard};
pub use normalize::{normalize_url, visit_key};

/// Resolves an `href` against a base URL, keeping only HTTP(S) targets
///
/// Returns None for empty hrefs, fragment-only anchors, `javascript:`,
/// `mailto:`, `tel:` and `data:` links, and anything that fails to resolve.
pub fn resolve_link(href: &str, base_url: &::url::Url) -> Option<::url::Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}
