// ============================================================
// Layer 2 - Pipeline Configuration
// ============================================================
// Every knob either workflow reads, in one serialisable struct.
// It can be built three ways:
//   - Default::default()            (the values below)
//   - a JSON file via `load_json`   (missing fields take defaults)
//   - CLI flags layered on top of either (see cli::commands)
//
// Directory locations are part of the config and are turned into
// a DataLayout on demand, so no path is ever a global constant.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::data::encoder::LabelEncoding;
use crate::data::normalizer::DEFAULT_MIN_TOKEN_LEN;
use crate::data::splitter::validate_fraction;
use crate::domain::error::PipelineResult;
use crate::infra::layout::DataLayout;

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/campusx-official/jupyter-masterclass/main/tweet_emotions.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Local path or http(s) URL of the raw CSV
    pub source: String,

    /// Root of the raw/ and interim/ directories
    pub data_dir: PathBuf,

    /// Overrides <data_dir>/raw
    pub raw_dir: Option<PathBuf>,

    /// Overrides <data_dir>/interim
    pub interim_dir: Option<PathBuf>,

    pub text_column: String,
    pub label_column: String,

    /// Identifier column dropped at ingest, if present
    pub id_column: Option<String>,

    /// Exactly two labels; the first encodes to 1, the second to 0
    pub admitted_classes: Vec<String>,

    pub test_fraction: f64,
    pub random_seed: u64,
    pub min_token_length: usize,

    /// Optional replacement word lists for the normaliser
    pub stopwords_path: Option<PathBuf>,
    pub lexicon_path: Option<PathBuf>,
    pub exceptions_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source:           DEFAULT_SOURCE.to_string(),
            data_dir:         PathBuf::from("data"),
            raw_dir:          None,
            interim_dir:      None,
            text_column:      "content".to_string(),
            label_column:     "sentiment".to_string(),
            id_column:        Some("tweet_id".to_string()),
            admitted_classes: vec!["happiness".to_string(), "sadness".to_string()],
            test_fraction:    0.2,
            random_seed:      42,
            min_token_length: DEFAULT_MIN_TOKEN_LEN,
            stopwords_path:   None,
            lexicon_path:     None,
            exceptions_path:  None,
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file. Fields not present keep their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file '{}'", path.display()))?;
        let cfg = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Check the values that have a constrained range.
    pub fn validate(&self) -> PipelineResult<()> {
        validate_fraction(self.test_fraction)?;
        self.label_encoding()?;
        Ok(())
    }

    pub fn label_encoding(&self) -> PipelineResult<LabelEncoding> {
        LabelEncoding::new(&self.admitted_classes)
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(&self.data_dir)
            .with_raw_dir(self.raw_dir.clone())
            .with_interim_dir(self.interim_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::layout::Partition;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = PipelineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!(cfg.random_seed, 42);
        assert_eq!(cfg.min_token_length, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{ "test_fraction": 0.25, "data_dir": "/srv/tweets" }}"#).unwrap();

        let cfg = PipelineConfig::load_json(f.path()).unwrap();
        assert_eq!(cfg.test_fraction, 0.25);
        assert_eq!(cfg.random_seed, 42);
        assert_eq!(
            cfg.layout().raw_file(Partition::Train),
            PathBuf::from("/srv/tweets/raw/train/train.csv")
        );
    }

    #[test]
    fn test_unknown_json_field_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{ "test_frac": 0.25 }}"#).unwrap();
        assert!(PipelineConfig::load_json(f.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = PipelineConfig { test_fraction: 1.0, ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = PipelineConfig {
            admitted_classes: vec!["happiness".into()],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
