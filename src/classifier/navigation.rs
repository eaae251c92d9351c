use super::{element_text, Candidate, Lexicon, Strategy};
use scraper::{Html, Selector};

const NAV_LINK_SELECTOR: &str = "nav a, .menu a, .navigation a, .services-menu a";

/// Service-looking menu entries
pub(super) fn extract(document: &Html, lexicon: &Lexicon) -> Vec<Candidate> {
    let Ok(links) = Selector::parse(NAV_LINK_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&links)
        .map(|link| element_text(&link))
        .filter(|text| {
            let len = text.chars().count();
            len > 3 && len < 50 && lexicon.is_service(text)
        })
        .map(|text| Candidate::new(text, Strategy::NavLink))
        .collect()
}
