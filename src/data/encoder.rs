// ============================================================
// Layer 4 - Class Filter and Label Encoder
// ============================================================
// Reduces a multi-emotion corpus to the two admitted classes and
// rewrites their labels as 1 / 0.
//
//   admitted = [positive, negative]
//   positive → 1
//   negative → 0
//
// Encoding is a membership replace: an already encoded label is
// left as it is, so running this step twice is harmless. A raw
// label outside the pair that still reaches `encode` is an error,
// never a silent default.

use crate::domain::corpus::Corpus;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::Label;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoding {
    positive: String,
    negative: String,
}

impl LabelEncoding {
    /// Build the bijection from exactly two distinct class names.
    /// The first maps to 1, the second to 0.
    pub fn new(admitted: &[String]) -> PipelineResult<Self> {
        match admitted {
            [positive, negative] if positive != negative => Ok(Self {
                positive: positive.clone(),
                negative: negative.clone(),
            }),
            _ => Err(PipelineError::InvalidConfig(format!(
                "admitted classes must be exactly two distinct labels, got {admitted:?}"
            ))),
        }
    }

    pub fn admitted(&self) -> [String; 2] {
        [self.positive.clone(), self.negative.clone()]
    }

    /// Whether a record with this label survives the class filter
    pub fn admits(&self, label: &Label) -> bool {
        match label {
            Label::Raw(s)     => *s == self.positive || *s == self.negative,
            Label::Encoded(_) => true,
        }
    }

    pub fn encode(&self, label: &Label) -> PipelineResult<Label> {
        match label {
            Label::Raw(s) if *s == self.positive => Ok(Label::Encoded(1)),
            Label::Raw(s) if *s == self.negative => Ok(Label::Encoded(0)),
            Label::Raw(s) => Err(PipelineError::EncodingMismatch {
                label:    s.clone(),
                admitted: self.admitted(),
            }),
            Label::Encoded(n) => Ok(Label::Encoded(*n)),
        }
    }
}

/// Keep admitted records, drop the identifier column, encode labels.
///
/// Output order is the filtered subsequence of the input order.
pub fn filter_and_encode(
    mut corpus: Corpus,
    encoding:   &LabelEncoding,
    id_column:  Option<&str>,
) -> PipelineResult<Corpus> {
    let before = corpus.len();
    corpus.retain(|r| encoding.admits(&r.label));
    tracing::info!(
        "Class filter kept {} of {} records ({:?})",
        corpus.len(),
        before,
        encoding.admitted()
    );

    if let Some(id) = id_column {
        if corpus.drop_column(id)? {
            tracing::debug!("Dropped identifier column '{}'", id);
        }
    }

    encode_labels(&mut corpus, encoding)?;
    Ok(corpus)
}

/// Apply the bijection to every record in place.
pub fn encode_labels(corpus: &mut Corpus, encoding: &LabelEncoding) -> PipelineResult<()> {
    for record in corpus.records_mut() {
        record.label = encoding.encode(&record.label)?;
    }
    Ok(())
}
