// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands a resolved
// PipelineConfig to the use cases in Layer 2.
//
// Three commands are supported:
//   1. `ingest`    - build raw train/test partitions
//   2. `normalize` - clean the text of those partitions
//   3. `run`       - both, in that order

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;

use crate::application::config::PipelineConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tweet-prep",
    version,
    about = "Prepare a labelled tweet corpus for a binary sentiment classifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routing only.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ingest(args)    => run_ingest(&args.resolve()?),
            Commands::Normalize(args) => run_normalize(&args.resolve()?),
            Commands::Run(args) => {
                let cfg = args.resolve()?;
                run_ingest(&cfg)?;
                run_normalize(&cfg)
            }
        }
    }
}

fn run_ingest(cfg: &PipelineConfig) -> Result<()> {
    use crate::application::ingest_use_case::IngestUseCase;

    tracing::debug!("Effective config: {}", serde_json::to_string(cfg)?);
    let summary = IngestUseCase::new(cfg.clone()).execute()?;

    println!(
        "Ingest complete: {} loaded, {} kept, {} train / {} test.",
        summary.loaded, summary.kept, summary.train, summary.test
    );
    Ok(())
}

fn run_normalize(cfg: &PipelineConfig) -> Result<()> {
    use crate::application::normalize_use_case::NormalizeUseCase;

    tracing::debug!("Effective config: {}", serde_json::to_string(cfg)?);
    let summary = NormalizeUseCase::new(cfg.clone()).execute()?;

    println!(
        "Normalisation complete: {} train / {} test records written to '{}'.",
        summary.train,
        summary.test,
        cfg.layout().interim_dir().display()
    );
    Ok(())
}
