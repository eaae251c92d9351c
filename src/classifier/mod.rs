//! Service classification over parsed pages
//!
//! Each extraction strategy is a pure function from a parsed document and a
//! [`Lexicon`] to a list of [`Candidate`]s. The classifier runs them in a
//! fixed order and unions the accepted strings into a [`ServiceSet`].

mod cards;
mod headers;
mod lexicon;
mod navigation;
mod paragraphs;
mod tabs;

pub use lexicon::Lexicon;

use crate::config::KeywordConfig;
use crate::crawler::PageContent;
use crate::state::ServiceSet;
use scraper::{ElementRef, Html};
use std::fmt;

/// Where a candidate string was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Header,
    ListItem,
    CardBlock,
    NavLink,
    TabLabel,
    ParagraphPattern,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Header => "header",
            Strategy::ListItem => "list-item",
            Strategy::CardBlock => "card-block",
            Strategy::NavLink => "nav-link",
            Strategy::TabLabel => "tab-label",
            Strategy::ParagraphPattern => "paragraph-pattern",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted string and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub strategy: Strategy,
}

impl Candidate {
    pub fn new(text: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            text: text.into(),
            strategy,
        }
    }
}

/// Runs every extraction strategy against a page
#[derive(Debug, Clone)]
pub struct Classifier {
    lexicon: Lexicon,
}

impl Classifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(Lexicon::from_config(config))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parses a fetched page and classifies it
    pub fn classify(&self, page: &PageContent) -> ServiceSet {
        let document = page.document();
        let services = self.classify_document(&document, page.rendered);
        tracing::debug!("{} services on {}", services.len(), page.url);
        services
    }

    /// Classifies an already parsed document
    ///
    /// The tab strategy only runs on browser-rendered pages; the paragraph
    /// strategy only on directly fetched ones.
    pub fn classify_document(&self, document: &Html, rendered: bool) -> ServiceSet {
        let mut services = ServiceSet::new();
        for candidate in self.candidates(document, rendered) {
            if services.insert(&candidate.text) {
                tracing::trace!("accepted {:?} via {}", candidate.text, candidate.strategy);
            }
        }
        services
    }

    /// All accepted candidates in strategy order, duplicates included
    pub fn candidates(&self, document: &Html, rendered: bool) -> Vec<Candidate> {
        let mut out = headers::extract(document, &self.lexicon);
        out.extend(cards::extract(document, &self.lexicon));
        out.extend(navigation::extract(document, &self.lexicon));

        if rendered {
            out.extend(tabs::extract(document, &self.lexicon));
        } else {
            out.extend(paragraphs::extract(document, &self.lexicon));
        }

        out
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

/// Element text with runs of whitespace collapsed to single spaces
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
