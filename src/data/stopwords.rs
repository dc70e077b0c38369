// ============================================================
// Layer 4 - Stopword Filter
// ============================================================
// Drops tokens that carry no sentiment signal ("the", "and",
// "was", ...). Matching is exact and case-sensitive; by the time
// this runs every token is already lowercase.
//
// The built-in list is the standard 179-word English list.
// Entries with apostrophes ("don't") never match a cleaned token
// but are kept so the list can be swapped for a file one-to-one.

use std::collections::HashSet;
use std::path::Path;

use crate::data::lemmatizer::{data_lines, read_resource};
use crate::domain::error::PipelineResult;
use crate::domain::traits::TextTransform;

const BUILTIN_ENGLISH: &str = include_str!("../../resources/stopwords_english.txt");

#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn english() -> Self {
        Self::from_source(BUILTIN_ENGLISH)
    }

    /// One word per line; blank lines and '#' comments are skipped.
    pub fn from_source(source: &str) -> Self {
        let words = data_lines(source).map(|w| w.trim().to_string()).collect();
        Self { words }
    }

    /// Read a word list from disk, or use the English list when no path is given.
    pub fn from_file(path: Option<&Path>) -> PipelineResult<Self> {
        let stopwords = match path {
            Some(p) => Self::from_source(&read_resource(p)?),
            None    => Self::english(),
        };
        tracing::debug!("Stopword list ready: {} words", stopwords.len());
        Ok(stopwords)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop stopword tokens and rejoin the rest with single spaces.
    pub fn remove(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|t| !self.contains(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

impl TextTransform for Stopwords {
    fn apply(&self, text: &str) -> String {
        self.remove(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_size() {
        assert_eq!(Stopwords::english().len(), 179);
    }

    #[test]
    fn test_removes_stopwords_only() {
        let sw = Stopwords::english();
        assert_eq!(sw.remove("the cat and the hat"), "cat hat");
        assert_eq!(sw.remove("the and of"), "");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let sw = Stopwords::english();
        assert_eq!(sw.remove("The cat"), "The cat");
    }

    #[test]
    fn test_custom_list() {
        let sw = Stopwords::from_source("# mine\nfoo\n\nbar\n");
        assert_eq!(sw.len(), 2);
        assert_eq!(sw.remove("foo baz bar qux"), "baz qux");
    }
}
