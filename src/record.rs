//! Transaction record model and the accumulator that builds it.

use crate::field::Field;
use serde::Serialize;

/// CSV column names, in output order.
pub const CSV_HEADER: [&str; 4] = ["date", "reference", "note", "amount"];

/// One completed QIF transaction, normalized for CSV output.
///
/// Every field is a string that defaults to empty when the source record
/// never set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// ISO-8601 timestamp at midnight UTC, e.g. `2023-12-25T00:00:00Z`
    pub date: String,

    /// Reference or check number
    pub reference: String,

    /// Memo text
    pub note: String,

    /// Signed amount with exactly 2 fraction digits
    pub amount: String,
}

/// Holds the in-progress record for one source.
///
/// Recognized fields overwrite their column (last write wins). The record is
/// only released by [`RecordAccumulator::take`], which the parser calls on a
/// terminator line.
#[derive(Debug, Default)]
pub struct RecordAccumulator {
    current: TransactionRecord,
    dirty: bool,
}

impl RecordAccumulator {
    /// Creates an accumulator holding an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a decoded field into the current record.
    ///
    /// Terminator and unknown fields leave the record untouched.
    pub fn merge(&mut self, field: Field) {
        match field {
            Field::Date(date) => self.current.date = date,
            Field::Reference(reference) => self.current.reference = reference,
            Field::Memo(note) => self.current.note = note,
            Field::Amount(amount) => self.current.amount = amount.to_string(),
            Field::Terminator | Field::Unknown { .. } => return,
        }
        self.dirty = true;
    }

    /// Hands off the current record and resets to an empty one.
    pub fn take(&mut self) -> TransactionRecord {
        self.dirty = false;
        std::mem::take(&mut self.current)
    }

    /// Returns `true` if fields were merged since the last [`take`](Self::take).
    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Read access to the record being built.
    pub fn current(&self) -> &TransactionRecord {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use std::str::FromStr;

    #[test]
    fn test_merge_sets_fields() {
        let mut acc = RecordAccumulator::new();
        acc.merge(Field::Date("2023-01-05T00:00:00Z".to_string()));
        acc.merge(Field::Reference("42".to_string()));
        acc.merge(Field::Memo("rent".to_string()));
        acc.merge(Field::Amount(Amount::from_str("-950").unwrap()));

        assert_eq!(
            acc.take(),
            TransactionRecord {
                date: "2023-01-05T00:00:00Z".to_string(),
                reference: "42".to_string(),
                note: "rent".to_string(),
                amount: "-950.00".to_string(),
            }
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut acc = RecordAccumulator::new();
        acc.merge(Field::Reference("first".to_string()));
        acc.merge(Field::Reference("second".to_string()));
        assert_eq!(acc.current().reference, "second");
    }

    #[test]
    fn test_take_resets() {
        let mut acc = RecordAccumulator::new();
        acc.merge(Field::Memo("note".to_string()));
        assert!(acc.has_pending());

        let record = acc.take();
        assert_eq!(record.note, "note");
        assert!(!acc.has_pending());
        assert_eq!(acc.current(), &TransactionRecord::default());
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut acc = RecordAccumulator::new();
        acc.merge(Field::Unknown {
            code: 'L',
            value: "Groceries".to_string(),
        });
        assert!(!acc.has_pending());
        assert_eq!(acc.take(), TransactionRecord::default());
    }
}
