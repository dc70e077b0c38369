// ============================================================
// Layer 3 - Core Traits
// ============================================================
// The application layer talks to sources and sinks through these
// traits so that a local CSV file, a remote CSV, or an in-memory
// fixture in a test all look the same to the workflow.

use std::path::Path;

use crate::domain::corpus::Corpus;
use crate::domain::error::PipelineResult;

// ─── CorpusSource ────────────────────────────────────────────────────────────
/// Anything that can produce a Corpus.
///
/// Implementations:
///   - CsvSource → local path or http(s) URL
pub trait CorpusSource {
    /// Read every record. The column layout must already contain
    /// the text and label columns or this fails with `SchemaError`.
    fn load(&self) -> PipelineResult<Corpus>;

    /// Human-readable location, used in log lines
    fn location(&self) -> &str;
}

// ─── CorpusSink ──────────────────────────────────────────────────────────────
/// Anything that can persist a whole Corpus to a path.
///
/// A sink must never leave a partially written file at `path`.
pub trait CorpusSink {
    fn write(&self, corpus: &Corpus, path: &Path) -> PipelineResult<()>;
}

// ─── TextTransform ───────────────────────────────────────────────────────────
/// A pure text rewrite. The normaliser as a whole implements this,
/// and so does each of its stages.
pub trait TextTransform {
    fn apply(&self, text: &str) -> String;
}
