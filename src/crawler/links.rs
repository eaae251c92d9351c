//! Link discovery for the crawl coordinator
//!
//! Two kinds of links are extracted from a parsed page:
//! - All `<a href>` anchors in document order, for depth expansion
//! - Anchors inside navigation regions together with their text, for
//!   side-visits
//!
//! Links are resolved against the page URL; `javascript:`, `mailto:`, `tel:`,
//! `data:` and fragment-only hrefs are dropped.

use crate::classifier::element_text;
use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

const NAV_REGION_LINKS: &str = "nav a[href], .menu a[href], .navigation a[href], header a[href]";

/// A navigation anchor with its visible text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub url: Url,
    pub text: String,
}

/// All followable anchors, in document order
///
/// Anchors carrying the `download` attribute are skipped.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|a| a.value().attr("download").is_none())
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Anchors inside `nav`, `.menu`, `.navigation` and `header`
///
/// An anchor nested in two of these regions is reported once.
pub fn extract_nav_links(document: &Html, base_url: &Url) -> Vec<NavLink> {
    let Ok(selector) = Selector::parse(NAV_REGION_LINKS) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let url = resolve_link(href, base_url)?;
            Some(NavLink {
                url,
                text: element_text(&a),
            })
        })
        .collect()
}
