// ============================================================
// Layer 3 - Pipeline Error Taxonomy
// ============================================================
// Every failure the loader or normaliser can raise on its own.
// The application layer wraps these with anyhow context; the
// variants themselves stay plain so tests can match on them.
//
// None of these are retried. A batch run that fails is
// expected to be re-run from the start.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input could not be opened, fetched or parsed.
    #[error("source '{location}' is unavailable: {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// A column the pipeline needs is not in the header row.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// A label outside the admitted pair reached the encoder.
    #[error("label '{label}' is not one of the admitted classes {admitted:?}")]
    EncodingMismatch { label: String, admitted: [String; 2] },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn source_unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason:   reason.to_string(),
        }
    }

    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
