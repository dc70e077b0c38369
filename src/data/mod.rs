// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything that touches records, from the raw CSV to the
// normalised token string.
//
//   CSV (path or URL)
//       │
//       ▼
//   CsvSource          → Corpus of raw records
//       │
//       ▼
//   filter_and_encode  → two classes, labels 1 / 0
//       │
//       ▼
//   shuffle + split    → seeded train / test
//
//   ... later, per partition ...
//
//   Normalizer         → Clean → DropShortTokens → Lemmatize → DropStopwords
//
// Each module does one step and is tested on its own.

/// Reads CSV from a local path or an http(s) URL
pub mod loader;

/// Two-class filter and label bijection
pub mod encoder;

/// Seeded shuffle and train/test split
pub mod splitter;

/// Ordered regex cleaning passes (normaliser stage 1)
pub mod cleaner;

/// Verb-only lemmatizer (normaliser stage 3)
pub mod lemmatizer;

/// Stopword list (normaliser stage 4)
pub mod stopwords;

/// The four-stage normaliser
pub mod normalizer;
