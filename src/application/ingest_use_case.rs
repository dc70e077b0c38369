// ============================================================
// Layer 2 - IngestUseCase
// ============================================================
// Produces the raw train/test partitions:
//
//   Step 1: Ensure raw/ directories    (Layer 6 - infra)
//   Step 2: Load the source CSV        (Layer 4 - data)
//   Step 3: Filter + encode labels     (Layer 4 - data)
//   Step 4: Seeded shuffle             (Layer 4 - data)
//   Step 5: Seeded train/test split    (Layer 4 - data)
//   Step 6: Write both partitions      (Layer 6 - infra)
//
// Nothing is written until both partitions exist in memory.

use anyhow::{Context, Result};

use crate::application::config::PipelineConfig;
use crate::data::{
    encoder::filter_and_encode,
    loader::CsvSource,
    splitter::{shuffle, split},
};
use crate::domain::corpus::Corpus;
use crate::domain::record::Label;
use crate::domain::traits::{CorpusSink, CorpusSource};
use crate::infra::{csv_store::CsvSink, layout::Partition};

/// Row counts of one ingest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub loaded: usize,
    pub kept:   usize,
    pub train:  usize,
    pub test:   usize,
}

pub struct IngestUseCase {
    config: PipelineConfig,
}

impl IngestUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run against the configured CSV source and write CSV partitions.
    pub fn execute(&self) -> Result<IngestSummary> {
        let cfg    = &self.config;
        let source = CsvSource::new(&cfg.source, &cfg.text_column, &cfg.label_column);
        self.execute_with(&source, &CsvSink::new())
    }

    pub fn execute_with(
        &self,
        source: &dyn CorpusSource,
        sink:   &dyn CorpusSink,
    ) -> Result<IngestSummary> {
        let cfg = &self.config;
        cfg.validate()?;
        let encoding = cfg.label_encoding()?;

        // ── Step 1: Output directories ────────────────────────────────────────
        let layout = cfg.layout();
        layout.ensure_raw_dirs()?;

        // ── Step 2: Load ─────────────────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", source.location());
        let corpus = source
            .load()
            .with_context(|| format!("Cannot load corpus from '{}'", source.location()))?;
        let loaded = corpus.len();

        // ── Step 3: Keep the admitted pair, encode to 1/0 ─────────────────────
        let filtered = filter_and_encode(corpus, &encoding, cfg.id_column.as_deref())?;
        let kept = filtered.len();

        // ── Step 4 + 5: Shuffle then split, both seeded ─────────────────────
        let shuffled      = shuffle(filtered, cfg.random_seed);
        let (train, test) = split(shuffled, cfg.test_fraction, cfg.random_seed)?;
        log_balance("train", &train);
        log_balance("test", &test);

        // ── Step 6: Persist ──────────────────────────────────────────────────
        for (partition, corpus) in [(Partition::Train, &train), (Partition::Test, &test)] {
            let path = layout.raw_file(partition);
            sink.write(corpus, &path)
                .with_context(|| format!("Cannot write {} partition", partition.name()))?;
        }

        Ok(IngestSummary {
            loaded,
            kept,
            train: train.len(),
            test:  test.len(),
        })
    }
}

fn log_balance(name: &str, corpus: &Corpus) {
    let positives = corpus
        .records()
        .iter()
        .filter(|r| r.label == Label::Encoded(1))
        .count();
    tracing::info!(
        "{} partition: {} records ({} positive, {} negative)",
        name,
        corpus.len(),
        positives,
        corpus.len() - positives
    );
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    fn write_source(dir: &Path) -> String {
        let mut csv = String::from("tweet_id,sentiment,author,content\n");
        let classes = ["happiness", "sadness", "worry", "neutral"];
        for i in 0..40 {
            csv.push_str(&format!("{i},{},user{i},tweet number {i}\n", classes[i % 4]));
        }
        let path = dir.join("source.csv");
        fs::write(&path, csv).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn config(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            source:   write_source(dir),
            data_dir: dir.join("data"),
            ..Default::default()
        }
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::Reader::from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_ingest_writes_both_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let layout = cfg.layout();

        let summary = IngestUseCase::new(cfg).execute().unwrap();
        assert_eq!(summary, IngestSummary { loaded: 40, kept: 20, train: 16, test: 4 });

        let header = csv::Reader::from_path(layout.raw_file(Partition::Train))
            .unwrap()
            .headers()
            .unwrap()
            .clone();
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["sentiment", "author", "content"]);

        let train = read_rows(&layout.raw_file(Partition::Train));
        let test = read_rows(&layout.raw_file(Partition::Test));
        assert_eq!(train.len(), 16);
        assert_eq!(test.len(), 4);

        for row in train.iter().chain(test.iter()) {
            assert!(matches!(&row[0], "0" | "1"), "label {}", &row[0]);
        }

        let authors: HashSet<String> = train
            .iter()
            .chain(test.iter())
            .map(|r| r[1].to_string())
            .collect();
        assert_eq!(authors.len(), 20);
    }

    #[test]
    fn test_ingest_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let path = cfg.layout().raw_file(Partition::Train);

        IngestUseCase::new(cfg.clone()).execute().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        IngestUseCase::new(cfg).execute().unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PipelineConfig {
            source:   dir.path().join("absent.csv").to_string_lossy().into_owned(),
            data_dir: dir.path().join("data"),
            ..Default::default()
        };
        let layout = cfg.layout();

        assert!(IngestUseCase::new(cfg).execute().is_err());
        assert!(!layout.raw_file(Partition::Train).exists());
        assert!(!layout.raw_file(Partition::Test).exists());
    }

    #[test]
    fn test_bad_fraction_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PipelineConfig {
            test_fraction: 0.0,
            ..config(dir.path())
        };
        assert!(IngestUseCase::new(cfg).execute().is_err());
        assert!(!dir.path().join("data").exists());
    }
}
