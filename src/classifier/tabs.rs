use super::{element_text, Candidate, Lexicon, Strategy};
use scraper::{Html, Selector};

/// Labels of tab widgets, which usually only exist after scripts run
pub(super) fn extract(document: &Html, lexicon: &Lexicon) -> Vec<Candidate> {
    let (Ok(containers), Ok(labels)) = (
        Selector::parse(".tab, .tabs, .tab-content"),
        Selector::parse(r#".tab-title, .nav-link, [role="tab"]"#),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for container in document.select(&containers) {
        for label in container.select(&labels) {
            let text = element_text(&label);
            if !text.is_empty() && lexicon.is_service(&text) {
                out.push(Candidate::new(text, Strategy::TabLabel));
            }
        }
    }
    out
}
