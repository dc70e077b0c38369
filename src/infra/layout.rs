// ============================================================
// Layer 6 - Data Directory Layout
// ============================================================
// Where partitions live on disk. Built from configuration at call
// time; nothing here is a process-wide constant.
//
//   <data_dir>/
//     raw/
//       train/train.csv           ← ingest output
//       test/test.csv
//     interim/
//       train_processed.csv       ← normalize output
//       test_processed.csv
//
// `raw` and `interim` can each be pointed somewhere else.
// Creating a directory that already exists is a no-op.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    pub const ALL: [Partition; 2] = [Partition::Train, Partition::Test];

    pub fn name(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test  => "test",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    raw_dir:     PathBuf,
    interim_dir: PathBuf,
}

impl DataLayout {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            raw_dir:     data_dir.join("raw"),
            interim_dir: data_dir.join("interim"),
        }
    }

    pub fn with_raw_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.raw_dir = dir;
        }
        self
    }

    pub fn with_interim_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.interim_dir = dir;
        }
        self
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn interim_dir(&self) -> &Path {
        &self.interim_dir
    }

    /// e.g. data/raw/train/train.csv
    pub fn raw_file(&self, partition: Partition) -> PathBuf {
        let name = partition.name();
        self.raw_dir.join(name).join(format!("{name}.csv"))
    }

    /// e.g. data/interim/train_processed.csv
    pub fn interim_file(&self, partition: Partition) -> PathBuf {
        self.interim_dir
            .join(format!("{}_processed.csv", partition.name()))
    }

    /// Create raw/, raw/train/ and raw/test/ if missing.
    pub fn ensure_raw_dirs(&self) -> PipelineResult<()> {
        ensure_dir(&self.raw_dir)?;
        for partition in Partition::ALL {
            ensure_dir(&self.raw_dir.join(partition.name()))?;
        }
        Ok(())
    }

    pub fn ensure_interim_dir(&self) -> PipelineResult<()> {
        ensure_dir(&self.interim_dir)
    }
}

fn ensure_dir(dir: &Path) -> PipelineResult<()> {
    // create_dir_all succeeds when the directory is already there
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    tracing::debug!("Ensured directory '{}'", dir.display());
    Ok(())
}
