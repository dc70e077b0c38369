// ============================================================
// Layer 4 - Verb Lemmatizer
// ============================================================
// Reduces every token to a base form *as if it were a verb*.
// Nouns, adjectives and adverbs go through the same rules, which
// is a deliberate simplification the classifier was tuned on.
//
// Lookup follows WordNet's morphology for verbs:
//
//   1. exception table   "went"    → ["go"]
//   2. otherwise detach  "crying"  → "crye" / "cry"
//      one suffix with the rules below and keep the results
//      that are in the verb lexicon
//   3. the token itself counts as a candidate if it is in
//      the lexicon; the shortest candidate wins, the token
//      itself winning ties
//   4. no candidate → the token comes back unchanged
//
// That lookup is repeated until the output stops changing, so
// lemmatizing a lemma is always a no-op.
//
// The built-in lexicon and exception table are small and
// compiled in. Full WordNet data can be used instead by pointing
// the config at `index.verb` and `verb.exc`: only the first
// field of each lexicon line is read and lines starting with
// whitespace or '#' are skipped, which covers both formats.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::TextTransform;

const BUILTIN_LEXICON: &str = include_str!("../../resources/verbs.txt");
const BUILTIN_EXCEPTIONS: &str = include_str!("../../resources/verb_exceptions.txt");

/// (suffix, replacement) pairs tried in order
const VERB_RULES: [(&str, &str); 8] = [
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lexicon:    HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl Lemmatizer {
    /// The compiled-in English verb tables
    pub fn builtin() -> Self {
        Self::from_sources(BUILTIN_LEXICON, BUILTIN_EXCEPTIONS)
    }

    /// Build from raw lexicon and exception-table text.
    pub fn from_sources(lexicon: &str, exceptions: &str) -> Self {
        let mut lexicon: HashSet<String> = data_lines(lexicon)
            .filter_map(|line| line.split_whitespace().next())
            .map(|w| w.to_lowercase())
            .collect();

        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        for line in data_lines(exceptions) {
            let mut fields = line.split_whitespace().map(str::to_lowercase);
            let Some(inflected) = fields.next() else { continue };
            let bases: Vec<String> = fields.collect();
            if bases.is_empty() {
                continue;
            }
            // Exception targets are base forms by definition
            lexicon.extend(bases.iter().cloned());
            table.entry(inflected).or_default().extend(bases);
        }

        Self { lexicon, exceptions: table }
    }

    /// Load tables from disk, falling back to the built-in ones for
    /// whichever path is not given.
    pub fn from_files(
        lexicon_path:    Option<&Path>,
        exceptions_path: Option<&Path>,
    ) -> PipelineResult<Self> {
        let lexicon = match lexicon_path {
            Some(p) => read_resource(p)?,
            None    => BUILTIN_LEXICON.to_string(),
        };
        let exceptions = match exceptions_path {
            Some(p) => read_resource(p)?,
            None    => BUILTIN_EXCEPTIONS.to_string(),
        };

        let lemmatizer = Self::from_sources(&lexicon, &exceptions);
        tracing::debug!(
            "Lemmatizer ready: {} base forms, {} exceptions",
            lemmatizer.lexicon.len(),
            lemmatizer.exceptions.len()
        );
        Ok(lemmatizer)
    }

    pub fn is_base_form(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    /// Lemmatize one token, iterating to a fixed point.
    pub fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();
        loop {
            let next = self.lookup(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Lemmatize every whitespace token and rejoin with single spaces.
    pub fn lemmatize_tokens(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|t| self.lemmatize(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One WordNet-style lookup step.
    fn lookup(&self, word: &str) -> String {
        let mut candidates: Vec<&str> = Vec::new();
        if self.lexicon.contains(word) {
            candidates.push(word);
        }

        match self.exceptions.get(word) {
            Some(bases) => candidates.extend(bases.iter().map(String::as_str)),
            None => {
                for (suffix, replacement) in VERB_RULES {
                    if let Some(stem) = word.strip_suffix(suffix) {
                        let form = format!("{stem}{replacement}");
                        if let Some(known) = self.lexicon.get(&form) {
                            candidates.push(known.as_str());
                        }
                    }
                }
            }
        }

        // min_by_key keeps the first of equally short candidates
        candidates
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or(word)
            .to_string()
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TextTransform for Lemmatizer {
    fn apply(&self, text: &str) -> String {
        self.lemmatize_tokens(text)
    }
}

/// Non-empty lines that do not start with whitespace or '#'
pub(crate) fn data_lines(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter(|line| {
        !line.is_empty() && !line.starts_with(char::is_whitespace) && !line.starts_with('#')
    })
}

pub(crate) fn read_resource(path: &Path) -> PipelineResult<String> {
    fs::read_to_string(path).map_err(|e| {
        PipelineError::InvalidConfig(format!(
            "cannot read resource file '{}': {e}",
            path.display()
        ))
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_regular_inflections() {
        let lem = Lemmatizer::builtin();
        assert_eq!(lem.lemmatize("crying"), "cry");
        assert_eq!(lem.lemmatize("cries"), "cry");
        assert_eq!(lem.lemmatize("loved"), "love");
        assert_eq!(lem.lemmatize("missed"), "miss");
        assert_eq!(lem.lemmatize("likes"), "like");
        assert_eq!(lem.lemmatize("happened"), "happen");
    }

    #[test]
    fn test_irregular_forms_use_exceptions() {
        let lem = Lemmatizer::builtin();
        assert_eq!(lem.lemmatize("was"), "be");
        assert_eq!(lem.lemmatize("went"), "go");
        assert_eq!(lem.lemmatize("running"), "run");
        assert_eq!(lem.lemmatize("sat"), "sit");
        assert_eq!(lem.lemmatize("found"), "find");
        assert_eq!(lem.lemmatize("tried"), "try");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let lem = Lemmatizer::builtin();
        for word in ["happiness", "morning", "days", "abc", "456", "café"] {
            assert_eq!(lem.lemmatize(word), word);
        }
    }

    #[test]
    fn test_base_forms_are_kept() {
        let lem = Lemmatizer::builtin();
        assert_eq!(lem.lemmatize("need"), "need");
        assert_eq!(lem.lemmatize("sing"), "sing");
        assert_eq!(lem.lemmatize("miss"), "miss");
    }

    #[test]
    fn test_every_token_is_treated_as_a_verb() {
        let lem = Lemmatizer::builtin();
        // "dreams" is a plural noun here but still takes the verb rule
        assert_eq!(lem.lemmatize("dreams"), "dream");
        assert_eq!(lem.lemmatize("plans"), "plan");
    }

    #[test]
    fn test_lemmatizing_is_idempotent() {
        let lem = Lemmatizer::builtin();
        let words = BUILTIN_LEXICON
            .lines()
            .chain(BUILTIN_EXCEPTIONS.lines().filter_map(|l| l.split_whitespace().next()))
            .chain(["crying", "hoped", "bed", "tired", "dreams", "happiness"]);
        for word in words {
            let once = lem.lemmatize(word);
            assert_eq!(lem.lemmatize(&once), once, "word: {word}");
        }
    }

    #[test]
    fn test_lemmatize_tokens_rejoins() {
        let lem = Lemmatizer::builtin();
        assert_eq!(lem.lemmatize_tokens("kids  were  laughing"), "kids be laugh");
    }

    #[test]
    fn test_custom_tables() {
        let lem = Lemmatizer::from_sources("# comment\n  header line\nwalk extra fields\n", "walkt walk\n");
        assert!(lem.is_base_form("walk"));
        assert!(!lem.is_base_form("header"));
        assert_eq!(lem.lemmatize("walking"), "walk");
        assert_eq!(lem.lemmatize("walkt"), "walk");
        assert_eq!(lem.lemmatize("crying"), "crying");
    }

    #[test]
    fn test_from_files_with_fallback() {
        let mut exc = NamedTempFile::new().unwrap();
        writeln!(exc, "gonna go").unwrap();
        let lem = Lemmatizer::from_files(None, Some(exc.path())).unwrap();
        assert_eq!(lem.lemmatize("gonna"), "go");
        assert_eq!(lem.lemmatize("crying"), "cry");
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let err = Lemmatizer::from_files(Some(Path::new("/no/such/index.verb")), None).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }
}
