// ============================================================
// Layer 4 - CSV Corpus Loader
// ============================================================
// Reads a header-first CSV into a Corpus.
//
// The source is either:
//   - an http:// or https:// URL, fetched with a blocking reqwest
//     client and parsed from the response body, or
//   - anything else, treated as a local filesystem path.
//
// Every failure to reach or parse the source becomes
// `SourceUnavailable`. A header row without the text or label
// column, or a data row whose field count differs from the
// header, becomes `SchemaError`. There is no retry here.
//
// Empty text cells are kept as `None` so the normaliser can
// apply its null coercion later. All other cells are copied
// verbatim.

use std::{fs::File, io::Read, time::Duration};

use crate::domain::corpus::{Columns, Corpus, Slot};
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::{Label, Record};
use crate::domain::traits::CorpusSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Loads a corpus from a CSV path or URL.
/// Implements the CorpusSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct CsvSource {
    location:     String,
    text_column:  String,
    label_column: String,
}

impl CsvSource {
    pub fn new(
        location:     impl Into<String>,
        text_column:  impl Into<String>,
        label_column: impl Into<String>,
    ) -> Self {
        Self {
            location:     location.into(),
            text_column:  text_column.into(),
            label_column: label_column.into(),
        }
    }

    /// True when the location should be fetched over HTTP
    pub fn is_remote(&self) -> bool {
        let lower = self.location.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    fn fetch(&self) -> PipelineResult<Vec<u8>> {
        let unavailable = |e: reqwest::Error| {
            PipelineError::source_unavailable(&self.location, e)
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(unavailable)?;

        let body = client
            .get(&self.location)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(unavailable)?;

        tracing::debug!("Fetched {} bytes from '{}'", body.len(), self.location);
        Ok(body.to_vec())
    }

    /// Parse CSV from any reader into a Corpus
    pub fn read_from<R: Read>(&self, reader: R) -> PipelineResult<Corpus> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| PipelineError::source_unavailable(&self.location, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let columns = Columns::resolve(&headers, &self.text_column, &self.label_column)?;

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|e| self.row_error(e))?;
            records.push(build_record(&columns, &row));
        }

        Ok(Corpus::new(columns, records))
    }

    /// A row with the wrong number of fields is a schema problem;
    /// anything else means the source itself could not be read.
    fn row_error(&self, err: csv::Error) -> PipelineError {
        match err.kind() {
            csv::ErrorKind::UnequalLengths { pos, expected_len, len } => {
                let line = pos
                    .as_ref()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                PipelineError::SchemaError(format!(
                    "'{}' line {line}: record has {len} fields, header has {expected_len}",
                    self.location
                ))
            }
            _ => PipelineError::source_unavailable(&self.location, err),
        }
    }
}

impl CorpusSource for CsvSource {
    fn load(&self) -> PipelineResult<Corpus> {
        let corpus = if self.is_remote() {
            let body = self.fetch()?;
            self.read_from(body.as_slice())?
        } else {
            let file = File::open(&self.location)
                .map_err(|e| PipelineError::source_unavailable(&self.location, e))?;
            self.read_from(file)?
        };

        tracing::info!(
            "Loaded {} records ({} columns) from '{}'",
            corpus.len(),
            corpus.columns().names().len(),
            self.location
        );
        Ok(corpus)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// Map one CSV row onto the resolved column slots.
fn build_record(columns: &Columns, row: &csv::StringRecord) -> Record {
    let mut text        = None;
    let mut label       = Label::Raw(String::new());
    let mut passthrough = Vec::with_capacity(columns.passthrough_len());

    for (slot, cell) in columns.slots().iter().zip(row.iter()) {
        match slot {
            Slot::Text           => text = (!cell.is_empty()).then(|| cell.to_string()),
            Slot::Label          => label = Label::Raw(cell.to_string()),
            Slot::Passthrough(_) => passthrough.push(cell.to_string()),
        }
    }

    Record::new(text, label, passthrough)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
tweet_id,sentiment,content
1,happiness,Good morning!
2,worry,ugh
3,sadness,
";

    fn source(location: &str) -> CsvSource {
        CsvSource::new(location, "content", "sentiment")
    }

    #[test]
    fn test_reads_rows_and_passthrough() {
        let corpus = source("inline").read_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 3);
        let first = &corpus.records()[0];
        assert_eq!(first.text.as_deref(), Some("Good morning!"));
        assert_eq!(first.label, Label::Raw("happiness".into()));
        assert_eq!(first.passthrough, vec!["1".to_string()]);
    }

    #[test]
    fn test_empty_text_cell_is_null() {
        let corpus = source("inline").read_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(corpus.records()[2].text, None);
    }

    #[test]
    fn test_missing_label_column_is_schema_error() {
        let err = source("inline")
            .read_from("tweet_id,content\n1,hi\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaError(_)));
    }

    #[test]
    fn test_short_row_is_schema_error() {
        let err = source("inline")
            .read_from("sentiment,content\nsadness\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaError(ref m) if m.contains("line 2")));
    }

    #[test]
    fn test_long_row_is_schema_error() {
        let err = source("inline")
            .read_from("sentiment,content\nsadness,a,extra\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaError(_)));
    }

    #[test]
    fn test_invalid_utf8_is_source_unavailable() {
        let bytes: &[u8] = b"sentiment,content\nsadness,\xff\xfe\n";
        let err = source("inline").read_from(bytes).unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_repeated_text_header_is_rejected() {
        let err = source("inline")
            .read_from("sentiment,content,content\nsadness,first,second\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaError(_)));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = source("/definitely/not/here.csv").load().unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_loads_local_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(SAMPLE.as_bytes()).unwrap();
        let path = tmp.path().to_string_lossy().to_string();
        let corpus = source(&path).load().unwrap();
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_remote_detection() {
        assert!(source("https://example.com/a.csv").is_remote());
        assert!(source("HTTP://example.com/a.csv").is_remote());
        assert!(!source("data/raw/train/train.csv").is_remote());
    }
}
