//! Search filter over quote records
//!
//! Three optional facets, ANDed together:
//! - `author`: case-insensitive substring of the author
//! - `tags`: every requested tag must be present (exact, case-sensitive)
//! - `quote`: any requested substring found, case-insensitively, in any text fragment
//!
//! Tags are all-of because they name a category; quote substrings are
//! alternative search terms and therefore any-of.

use crate::quote::Quote;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub quote: Vec<String>,
}

impl QuoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = if author.is_empty() { None } else { Some(author) };
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !tag.is_empty() {
            self.tags.push(tag);
        }
        self
    }

    pub fn quote(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.quote.push(text);
        }
        self
    }

    /// Build a filter from URL query pairs.
    ///
    /// Repeated keys accumulate (`tags=a&tags=b`); unknown keys are ignored.
    /// When `author` repeats, the last non-empty value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::new();
        for (key, value) in pairs {
            match key.as_ref() {
                "author" => {
                    let value = value.into();
                    if !value.is_empty() {
                        filter.author = Some(value);
                    }
                }
                "tags" => filter = filter.tag(value),
                "quote" => filter = filter.quote(value),
                _ => {}
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.tags.is_empty() && self.quote.is_empty()
    }

    /// Check whether a quote satisfies every supplied facet
    pub fn matches(&self, quote: &Quote) -> bool {
        self.matches_author(quote) && self.matches_tags(quote) && self.matches_text(quote)
    }

    fn matches_author(&self, quote: &Quote) -> bool {
        let Some(needle) = &self.author else {
            return true;
        };
        match &quote.author {
            Some(author) => author.to_lowercase().contains(&needle.to_lowercase()),
            None => false,
        }
    }

    fn matches_tags(&self, quote: &Quote) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        match &quote.tags {
            Some(tags) => self.tags.iter().all(|wanted| tags.contains(wanted)),
            None => false,
        }
    }

    fn matches_text(&self, quote: &Quote) -> bool {
        if self.quote.is_empty() {
            return true;
        }
        let Some(fragments) = &quote.quote_text else {
            return false;
        };
        let needles: Vec<String> = self.quote.iter().map(|q| q.to_lowercase()).collect();
        fragments.iter().any(|fragment| {
            let fragment = fragment.to_lowercase();
            needles.iter().any(|needle| fragment.contains(needle.as_str()))
        })
    }
}
