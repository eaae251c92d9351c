use super::{element_text, Candidate, Lexicon, Strategy};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Capitalized phrase after a "provide"/"offer"-style verb
static SERVICE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:provide|offer|specialize in|including)(?:\s\w+){0,3}\s((?:[A-Z][a-z]+\s?){1,5})")
        .expect("service phrase pattern is valid")
});

/// Title-cased service names mentioned in running text
///
/// A paragraph is only scanned when it says "provide <keyword>" or
/// "offer <keyword>" for some service keyword.
pub(super) fn extract(document: &Html, lexicon: &Lexicon) -> Vec<Candidate> {
    let Ok(paragraphs) = Selector::parse("p") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for paragraph in document.select(&paragraphs) {
        let text = element_text(&paragraph);
        if !mentions_offering(&text, lexicon) {
            continue;
        }

        for captures in SERVICE_PHRASE.captures_iter(&text) {
            let Some(phrase) = captures.get(1) else {
                continue;
            };
            let phrase = phrase.as_str().trim();
            if !phrase.is_empty() && !lexicon.has_exclude(phrase) {
                out.push(Candidate::new(phrase, Strategy::ParagraphPattern));
            }
        }
    }
    out
}

fn mentions_offering(text: &str, lexicon: &Lexicon) -> bool {
    let lowered = text.to_lowercase();
    lexicon.include_keywords().iter().any(|kw| {
        lowered.contains(&format!("provide {kw}")) || lowered.contains(&format!("offer {kw}"))
    })
}
