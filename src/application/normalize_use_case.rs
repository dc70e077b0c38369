// ============================================================
// Layer 2 - NormalizeUseCase
// ============================================================
// Rewrites the text column of both raw partitions:
//
//   Step 1: Load stopword + lemmatizer tables   (Layer 4 - data)
//   Step 2: Read raw train and test partitions  (Layer 4 - data)
//   Step 3: Normalise every record              (Layer 4 - data)
//   Step 4: Ensure interim/ directory           (Layer 6 - infra)
//   Step 5: Write both processed partitions     (Layer 6 - infra)
//
// Both partitions are normalised in memory before anything is
// written, so a failure on the test file leaves no train output.

use anyhow::{Context, Result};

use crate::application::config::PipelineConfig;
use crate::data::{
    lemmatizer::Lemmatizer,
    loader::CsvSource,
    normalizer::Normalizer,
    stopwords::Stopwords,
};
use crate::domain::corpus::Corpus;
use crate::domain::traits::{CorpusSink, CorpusSource};
use crate::infra::{csv_store::CsvSink, layout::Partition};

/// Records normalised per partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub train: usize,
    pub test:  usize,
}

pub struct NormalizeUseCase {
    config: PipelineConfig,
}

impl NormalizeUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Build the normaliser from the configured tables.
    pub fn build_normalizer(&self) -> Result<Normalizer> {
        let cfg = &self.config;
        let lemmatizer = Lemmatizer::from_files(
            cfg.lexicon_path.as_deref(),
            cfg.exceptions_path.as_deref(),
        )?;
        let stopwords = Stopwords::from_file(cfg.stopwords_path.as_deref())?;
        Ok(Normalizer::new(cfg.min_token_length, lemmatizer, stopwords))
    }

    pub fn execute(&self) -> Result<NormalizeSummary> {
        let cfg    = &self.config;
        let layout = cfg.layout();

        // ── Step 1: Tables ────────────────────────────────────────────────────
        let normalizer = self.build_normalizer()?;

        // ── Step 2 + 3: Read and normalise each partition ─────────────────────
        let mut processed: Vec<(Partition, Corpus)> = Vec::with_capacity(2);
        for partition in Partition::ALL {
            let path   = layout.raw_file(partition);
            let source = CsvSource::new(
                path.to_string_lossy(),
                &cfg.text_column,
                &cfg.label_column,
            );
            let mut corpus = source
                .load()
                .with_context(|| format!("Cannot read {} partition", partition.name()))?;

            tracing::info!(
                "Normalising {} partition ({} records, min_token_length={})",
                partition.name(),
                corpus.len(),
                normalizer.min_token_len()
            );
            normalizer.normalize_corpus(&mut corpus);
            processed.push((partition, corpus));
        }

        // ── Step 4 + 5: Persist ──────────────────────────────────────────────
        layout.ensure_interim_dir()?;
        let sink = CsvSink::new();
        for (partition, corpus) in &processed {
            sink.write(corpus, &layout.interim_file(*partition))
                .with_context(|| format!("Cannot write processed {} partition", partition.name()))?;
        }

        let count = |p: Partition| {
            processed
                .iter()
                .find(|(q, _)| *q == p)
                .map(|(_, c)| c.len())
                .unwrap_or(0)
        };
        Ok(NormalizeSummary {
            train: count(Partition::Train),
            test:  count(Partition::Test),
        })
    }
}
