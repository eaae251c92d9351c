use super::{element_text, Candidate, Lexicon, Strategy};
use scraper::{ElementRef, Html, Selector};

/// Headings that name a service area, plus the list that follows them
///
/// A heading qualifies when it contains a service keyword and no exclude
/// phrase. If its next element sibling is a `ul`/`ol`, each `li` with more
/// than three characters, fewer than ten words and no exclude phrase is taken
/// without further keyword checks. The heading text itself is kept when it is
/// short enough and not self-referential, or when it labels a list that
/// produced at least one item.
pub(super) fn extract(document: &Html, lexicon: &Lexicon) -> Vec<Candidate> {
    let mut out = Vec::new();

    let (Ok(heading_selector), Ok(item_selector)) =
        (Selector::parse("h1, h2, h3, h4"), Selector::parse("li"))
    else {
        return out;
    };

    for heading in document.select(&heading_selector) {
        let text = element_text(&heading);
        if !lexicon.is_service(&text) {
            continue;
        }

        let mut list_items = 0;
        if let Some(list) = following_list(&heading) {
            for item in list.select(&item_selector) {
                let item_text = element_text(&item);
                if is_list_service(&item_text, lexicon) {
                    out.push(Candidate::new(item_text, Strategy::ListItem));
                    list_items += 1;
                }
            }
        }

        let len = text.chars().count();
        let labels_list = list_items > 0;
        if len > 3 && len < 100 && (labels_list || !lexicon.has_self_referential(&text)) {
            out.push(Candidate::new(text, Strategy::Header));
        }
    }

    out
}

/// The heading's next element sibling, if it is a list
fn following_list<'a>(heading: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let next = heading.next_siblings().find_map(ElementRef::wrap)?;
    matches!(next.value().name(), "ul" | "ol").then_some(next)
}

fn is_list_service(text: &str, lexicon: &Lexicon) -> bool {
    text.chars().count() > 3 && text.split_whitespace().count() < 10 && !lexicon.has_exclude(text)
}
