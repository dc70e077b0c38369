// ============================================================
// Layer 3 - Record and Label
// ============================================================
// One row of the corpus. Only `text` and `label` are interpreted;
// every other column rides along in `passthrough`, in header
// order, so it can be written back exactly where it came from.

use std::fmt;

/// What a null text cell becomes before cleaning.
/// Matches how the upstream tabular tooling stringifies a missing value.
pub const NULL_TEXT: &str = "nan";

/// A class label, either as read from the source or after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The class string exactly as it appeared in the source
    Raw(String),

    /// The numeric class after the admitted-pair bijection (0 or 1)
    Encoded(u8),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Raw(s)     => f.write_str(s),
            Label::Encoded(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Free text. `None` when the source cell was empty.
    pub text: Option<String>,

    pub label: Label,

    /// Uninterpreted cells, in `Slot::Passthrough` order
    pub passthrough: Vec<String>,
}

impl Record {
    pub fn new(text: Option<String>, label: Label, passthrough: Vec<String>) -> Self {
        Self { text, label, passthrough }
    }

    /// The text as the normaliser sees it: nulls are coerced, never rejected.
    pub fn text_or_null(&self) -> &str {
        self.text.as_deref().unwrap_or(NULL_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_text_is_coerced() {
        let r = Record::new(None, Label::Raw("sadness".into()), vec![]);
        assert_eq!(r.text_or_null(), "nan");
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Encoded(1).to_string(), "1");
        assert_eq!(Label::Raw("happiness".into()).to_string(), "happiness");
    }
}
