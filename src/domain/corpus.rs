// ============================================================
// Layer 3 - Corpus and Column Layout
// ============================================================
// A Corpus is an ordered list of Records plus the header layout
// needed to write them back out.
//
// The layout remembers, for every header position, whether that
// column is the text column, the label column, or the n-th
// passthrough column. Writing a row is then just walking the
// slots in order:
//
//   headers:  tweet_id | sentiment | content | author
//   slots:    Pass(0)  | Label     | Text    | Pass(1)
//
// Dropping a passthrough column removes its slot and shifts the
// later passthrough indices down by one, in every record.

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::Record;

/// What a single header position holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Text,
    Label,
    Passthrough(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    names: Vec<String>,
    slots: Vec<Slot>,
}

impl Columns {
    /// Resolve a header row against the required text and label column names.
    ///
    /// Fails with `SchemaError` naming the first missing column, or the
    /// first required column that appears more than once.
    pub fn resolve(
        headers:      &[String],
        text_column:  &str,
        label_column: &str,
    ) -> PipelineResult<Self> {
        for required in [text_column, label_column] {
            match headers.iter().filter(|h| *h == required).count() {
                0 => {
                    return Err(PipelineError::SchemaError(format!(
                        "required column '{required}' is missing (found: {})",
                        headers.join(", ")
                    )))
                }
                1 => {}
                n => {
                    return Err(PipelineError::SchemaError(format!(
                        "required column '{required}' appears {n} times in the header"
                    )))
                }
            }
        }
        if text_column == label_column {
            return Err(PipelineError::SchemaError(format!(
                "text and label cannot both be column '{text_column}'"
            )));
        }

        let mut next_pass = 0usize;
        let slots = headers
            .iter()
            .map(|h| {
                if h == text_column {
                    Slot::Text
                } else if h == label_column {
                    Slot::Label
                } else {
                    next_pass += 1;
                    Slot::Passthrough(next_pass - 1)
                }
            })
            .collect();

        Ok(Self { names: headers.to_vec(), slots })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn text_name(&self) -> &str {
        self.name_of(Slot::Text)
    }

    pub fn label_name(&self) -> &str {
        self.name_of(Slot::Label)
    }

    /// Number of passthrough columns each record must carry
    pub fn passthrough_len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Passthrough(_)))
            .count()
    }

    fn name_of(&self, slot: Slot) -> &str {
        self.slots
            .iter()
            .position(|s| *s == slot)
            .map(|i| self.names[i].as_str())
            .unwrap_or_default()
    }

    /// Index of the passthrough cell for `name`, if that column is a passthrough.
    fn passthrough_index(&self, name: &str) -> Option<(usize, usize)> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|pos| match self.slots[pos] {
                Slot::Passthrough(p) => Some((pos, p)),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    columns: Columns,
    records: Vec<Record>,
}

impl Corpus {
    pub fn new(columns: Columns, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into layout and rows, for steps that reorder or partition rows.
    pub fn into_parts(self) -> (Columns, Vec<Record>) {
        (self.columns, self.records)
    }

    /// Keep only the records matching `keep`, preserving their relative order.
    pub fn retain(&mut self, keep: impl FnMut(&Record) -> bool) {
        self.records.retain(keep);
    }

    /// Remove a passthrough column from the layout and from every record.
    ///
    /// Returns `false` when no such column exists. Asking to drop the text
    /// or label column is a schema error.
    pub fn drop_column(&mut self, name: &str) -> PipelineResult<bool> {
        if name == self.columns.text_name() || name == self.columns.label_name() {
            return Err(PipelineError::SchemaError(format!(
                "cannot drop required column '{name}'"
            )));
        }

        let Some((pos, dropped)) = self.columns.passthrough_index(name) else {
            return Ok(false);
        };

        self.columns.names.remove(pos);
        self.columns.slots.remove(pos);
        for slot in &mut self.columns.slots {
            if let Slot::Passthrough(p) = slot {
                if *p > dropped {
                    *p -= 1;
                }
            }
        }
        for record in &mut self.records {
            if dropped < record.passthrough.len() {
                record.passthrough.remove(dropped);
            }
        }
        Ok(true)
    }
}
