use super::{element_text, Candidate, Lexicon, Strategy};
use scraper::{Html, Selector};

const CARD_SELECTOR: &str = ".service, .card, .box, .item, .feature, .treatment, .procedure";
const CARD_TITLE_SELECTOR: &str = "h2, h3, h4, .title, .heading, .service-title";

/// Titles of service cards and feature boxes
///
/// Only the first title element inside each block is considered. It must
/// start with an uppercase letter and name a service.
pub(super) fn extract(document: &Html, lexicon: &Lexicon) -> Vec<Candidate> {
    let (Ok(cards), Ok(titles)) = (
        Selector::parse(CARD_SELECTOR),
        Selector::parse(CARD_TITLE_SELECTOR),
    ) else {
        return Vec::new();
    };

    document
        .select(&cards)
        .filter_map(|card| card.select(&titles).next())
        .map(|title| element_text(&title))
        .filter(|text| {
            let len = text.chars().count();
            len > 3
                && len < 100
                && text.chars().next().is_some_and(char::is_uppercase)
                && lexicon.is_service(text)
        })
        .map(|text| Candidate::new(text, Strategy::CardBlock))
        .collect()
}
