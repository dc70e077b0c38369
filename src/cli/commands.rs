// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Three subcommands share one set of flags. Every flag is
// optional: values come from `--config <file.json>` if given,
// otherwise from the built-in defaults, and any flag passed on
// the command line overrides both.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::config::PipelineConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the corpus, keep two classes, split into raw train/test CSVs
    Ingest(ConfigArgs),

    /// Normalise the text column of the raw train/test CSVs
    Normalize(ConfigArgs),

    /// Ingest, then normalise
    Run(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON file with any subset of the configuration fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV path or http(s) URL to ingest
    #[arg(long)]
    pub source: Option<String>,

    /// Root directory for raw/ and interim/ [default: data]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for raw partitions [default: <data-dir>/raw]
    #[arg(long)]
    pub raw_dir: Option<PathBuf>,

    /// Directory for processed partitions [default: <data-dir>/interim]
    #[arg(long)]
    pub interim_dir: Option<PathBuf>,

    /// Name of the free-text column [default: content]
    #[arg(long)]
    pub text_column: Option<String>,

    /// Name of the class-label column [default: sentiment]
    #[arg(long)]
    pub label_column: Option<String>,

    /// Identifier column to drop at ingest [default: tweet_id]
    #[arg(long, conflicts_with = "keep_id_column")]
    pub id_column: Option<String>,

    /// Do not drop any identifier column
    #[arg(long)]
    pub keep_id_column: bool,

    /// The two admitted classes, positive first [default: happiness,sadness]
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub classes: Option<Vec<String>>,

    /// Share of records held out for testing, in (0, 1) [default: 0.2]
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the shuffle and the split [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tokens shorter than this are dropped [default: 3]
    #[arg(long)]
    pub min_token_length: Option<usize>,

    /// Stopword list, one word per line
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// Verb lexicon (one base form per line, or WordNet index.verb)
    #[arg(long)]
    pub lexicon: Option<PathBuf>,

    /// Verb exception table ("inflected base" lines, WordNet verb.exc)
    #[arg(long)]
    pub exceptions: Option<PathBuf>,
}

impl ConfigArgs {
    /// Merge file config (or defaults) with explicitly passed flags.
    pub fn resolve(self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load_json(path)?,
            None       => PipelineConfig::default(),
        };

        if let Some(v) = self.source           { cfg.source = v; }
        if let Some(v) = self.data_dir         { cfg.data_dir = v; }
        if let Some(v) = self.raw_dir          { cfg.raw_dir = Some(v); }
        if let Some(v) = self.interim_dir      { cfg.interim_dir = Some(v); }
        if let Some(v) = self.text_column      { cfg.text_column = v; }
        if let Some(v) = self.label_column     { cfg.label_column = v; }
        if let Some(v) = self.id_column        { cfg.id_column = Some(v); }
        if self.keep_id_column                 { cfg.id_column = None; }
        if let Some(v) = self.classes          { cfg.admitted_classes = v; }
        if let Some(v) = self.test_fraction    { cfg.test_fraction = v; }
        if let Some(v) = self.seed             { cfg.random_seed = v; }
        if let Some(v) = self.min_token_length { cfg.min_token_length = v; }
        if let Some(v) = self.stopwords        { cfg.stopwords_path = Some(v); }
        if let Some(v) = self.lexicon          { cfg.lexicon_path = Some(v); }
        if let Some(v) = self.exceptions       { cfg.exceptions_path = Some(v); }

        Ok(cfg)
    }
}
