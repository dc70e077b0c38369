// ============================================================
// Layer 4 - Text Normaliser
// ============================================================
// Turns a raw tweet into the token string the classifier sees.
// Four stages, always in this order:
//
//   raw text
//       │
//       ▼
//   Clean            → lowercase, strip urls/emails/digits/punctuation
//       │
//       ▼
//   DropShortTokens  → drop tokens under `min_token_len` chars
//       │
//       ▼
//   Lemmatize        → verb base form for every token
//       │
//       ▼
//   DropStopwords    → drop "the", "and", ...
//       │
//       ▼
//   normalised text
//
// Each stage only makes sense after the one above it: token
// boundaries are not real words until cleaning has run, and the
// stopword list is keyed on base forms, so "was" must already be
// "be" when it gets there.
//
// The normaliser holds no state between records. The lemmatizer
// and stopword tables are read-only, so records are processed in
// parallel with rayon and written back in their original order.

use rayon::prelude::*;

use crate::data::cleaner::Cleaner;
use crate::data::lemmatizer::Lemmatizer;
use crate::data::stopwords::Stopwords;
use crate::domain::corpus::Corpus;
use crate::domain::traits::TextTransform;

pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    DropShortTokens,
    Lemmatize,
    DropStopwords,
}

/// The only order the stages ever run in
pub const STAGES: [Stage; 4] = [
    Stage::Clean,
    Stage::DropShortTokens,
    Stage::Lemmatize,
    Stage::DropStopwords,
];

/// Drop every token shorter than `min_len` characters.
pub fn drop_short_tokens(text: &str, min_len: usize) -> String {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= min_len)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stage 2 of the normaliser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortTokenFilter {
    pub min_len: usize,
}

impl TextTransform for ShortTokenFilter {
    fn apply(&self, text: &str) -> String {
        drop_short_tokens(text, self.min_len)
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    cleaner:      Cleaner,
    short_tokens: ShortTokenFilter,
    lemmatizer:   Lemmatizer,
    stopwords:    Stopwords,
}

impl Normalizer {
    pub fn new(min_token_len: usize, lemmatizer: Lemmatizer, stopwords: Stopwords) -> Self {
        Self {
            cleaner:      Cleaner,
            short_tokens: ShortTokenFilter { min_len: min_token_len },
            lemmatizer,
            stopwords,
        }
    }

    pub fn min_token_len(&self) -> usize {
        self.short_tokens.min_len
    }

    /// The transform behind a stage
    pub fn transform(&self, stage: Stage) -> &dyn TextTransform {
        match stage {
            Stage::Clean           => &self.cleaner,
            Stage::DropShortTokens => &self.short_tokens,
            Stage::Lemmatize       => &self.lemmatizer,
            Stage::DropStopwords   => &self.stopwords,
        }
    }

    /// Run a single stage on already-staged text.
    pub fn run_stage(&self, stage: Stage, text: &str) -> String {
        self.transform(stage).apply(text)
    }

    /// Run every stage in order.
    pub fn normalize(&self, text: &str) -> String {
        STAGES
            .iter()
            .fold(text.to_string(), |acc, stage| self.run_stage(*stage, &acc))
    }

    /// Replace the text of every record with its normalised form.
    ///
    /// Null text is normalised as the literal "nan".
    pub fn normalize_corpus(&self, corpus: &mut Corpus) {
        corpus.records_mut().par_iter_mut().for_each(|record| {
            let normalized = self.normalize(record.text_or_null());
            record.text = Some(normalized);
        });

        let emptied = corpus
            .records()
            .iter()
            .filter(|r| r.text.as_deref().is_some_and(str::is_empty))
            .count();
        tracing::info!(
            "Normalised {} records ({} ended up empty)",
            corpus.len(),
            emptied
        );
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LEN, Lemmatizer::builtin(), Stopwords::english())
    }
}

impl TextTransform for Normalizer {
    fn apply(&self, text: &str) -> String {
        self.normalize(text)
    }
}
