// ============================================================
// Layer 6 - CSV Partition Writer
// ============================================================
// Writes a Corpus back out as CSV with the same header order it
// was read with (minus any dropped columns).
//
// Rows go to a hidden temporary file next to the target, which
// is renamed over the target only after a successful flush. A
// failed write therefore never leaves a half-written partition
// behind.
//
// Null text is written as an empty cell, the same way it was read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::corpus::{Corpus, Slot};
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::Record;
use crate::domain::traits::CorpusSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn new() -> Self {
        Self
    }

    fn write_rows(&self, corpus: &Corpus, tmp: &Path) -> PipelineResult<()> {
        let csv_err = |e: csv::Error| PipelineError::io(tmp, e.into());

        let mut writer = csv::Writer::from_path(tmp).map_err(csv_err)?;
        writer.write_record(corpus.columns().names()).map_err(csv_err)?;

        let slots = corpus.columns().slots();
        for record in corpus.records() {
            writer
                .write_record(slots.iter().map(|slot| cell(record, *slot)))
                .map_err(csv_err)?;
        }

        writer.flush().map_err(|e| PipelineError::io(tmp, e))
    }
}

impl CorpusSink for CsvSink {
    fn write(&self, corpus: &Corpus, path: &Path) -> PipelineResult<()> {
        let tmp = temp_sibling(path);

        if let Err(e) = self.write_rows(corpus, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            PipelineError::io(path, e)
        })?;

        tracing::info!("Wrote {} records to '{}'", corpus.len(), path.display());
        Ok(())
    }
}

fn cell(record: &Record, slot: Slot) -> String {
    match slot {
        Slot::Text           => record.text.clone().unwrap_or_default(),
        Slot::Label          => record.label.to_string(),
        Slot::Passthrough(p) => record.passthrough.get(p).cloned().unwrap_or_default(),
    }
}

/// data/raw/train/train.csv → data/raw/train/.train.csv.tmp
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "partition".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
