use crate::config::KeywordConfig;

/// Include/exclude vocabularies used to judge candidate strings
///
/// All entries are stored lowercase. Include and exclude entries match as
/// substrings of the lowercased text; self-referential entries match whole
/// words only, so "we" does not fire on "wellness".
#[derive(Debug, Clone)]
pub struct Lexicon {
    include: Vec<String>,
    exclude: Vec<String>,
    self_referential: Vec<String>,
}

impl Lexicon {
    pub fn new<I, E, S>(include: I, exclude: E, self_referential: S) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            include: lowered(include),
            exclude: lowered(exclude),
            self_referential: lowered(self_referential),
        }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(
            &config.include,
            &config.exclude,
            &config.self_referential,
        )
    }

    /// Service keywords, lowercase
    pub fn include_keywords(&self) -> &[String] {
        &self.include
    }

    /// Exclude phrases, lowercase
    pub fn exclude_phrases(&self) -> &[String] {
        &self.exclude
    }

    /// Service keywords found in the text
    pub fn matching_includes<'a>(&'a self, text: &str) -> Vec<&'a str> {
        matching(&self.include, text)
    }

    /// Exclude phrases found in the text
    pub fn matching_excludes<'a>(&'a self, text: &str) -> Vec<&'a str> {
        matching(&self.exclude, text)
    }

    /// Returns true if the text contains at least one service keyword
    pub fn has_include(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.include.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// Returns true if the text contains any exclude phrase
    pub fn has_exclude(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.exclude.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// Service keyword present and no exclude phrase
    pub fn is_service(&self, text: &str) -> bool {
        !self.has_exclude(text) && self.has_include(text)
    }

    /// Returns true if any self-referential entry appears as whole word(s)
    pub fn has_self_referential(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.self_referential.iter().any(|entry| {
            let needle: Vec<&str> = entry.split_whitespace().collect();
            !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
        })
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from_config(&KeywordConfig::default())
    }
}

fn matching<'a>(entries: &'a [String], text: &str) -> Vec<&'a str> {
    let text = text.to_lowercase();
    entries
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .map(String::as_str)
        .collect()
}

fn lowered<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
