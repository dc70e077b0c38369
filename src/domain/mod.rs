// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain structs, enums and traits describing the corpus.
//
// Rules for this layer:
//   - NO file or network I/O
//   - NO regexes or text processing
//   - Only the shapes everything else agrees on
//
// Everything here can be unit tested without touching disk.

/// Record, Label and the null-text coercion
pub mod record;

/// Corpus plus its column layout
pub mod corpus;

/// Error taxonomy shared by every layer below the CLI
pub mod error;

/// Source, sink and transform abstractions
pub mod traits;
