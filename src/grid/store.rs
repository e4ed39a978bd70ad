use super::types::{Classification, ComparisonRecord, MoveDirection, RawRecord, Side};
use crate::constant::BLANK_MARKER;
use tracing::warn;

/// Owns the ordered sequence of comparison records.
///
/// Single source of truth for the grid: the renderer and the classifier only
/// derive display state from it, they never keep an independent copy.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<ComparisonRecord>,
}

impl RecordStore {
    /// Load the sequence from a raw JSON payload (array of records).
    ///
    /// Fails soft: a payload that is not valid JSON or not an array leaves
    /// the sequence empty and logs a warning, it never propagates an error.
    pub fn load(&mut self, raw: &str) {
        match serde_json::from_str::<Vec<RawRecord>>(raw) {
            Ok(raw_records) => self.load_records(raw_records),
            Err(e) => {
                warn!("Invalid comparison payload, grid stays empty: {}", e);
                self.records.clear();
            }
        }
    }

    /// Build the sequence from already-parsed payload records.
    ///
    /// Null texts coerce to the empty string; a missing or unknown
    /// `diff_type` defaults to `Major`.
    pub fn load_records(&mut self, raw_records: Vec<RawRecord>) {
        self.records = raw_records
            .into_iter()
            .map(|r| ComparisonRecord {
                expected: r.expected.unwrap_or_default(),
                actual: r.actual.unwrap_or_default(),
                classification: Classification::from_tag(r.diff_type.as_deref()),
            })
            .collect();
    }

    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert a placeholder row right after `after`, or append when no row
    /// is focused. The named side gets the blank marker, the other side the
    /// empty string.
    pub fn insert_placeholder(&mut self, after: Option<usize>, side: Side) {
        let mut record = ComparisonRecord {
            expected: String::new(),
            actual: String::new(),
            classification: Classification::Blank,
        };
        *record.side_mut(side) = BLANK_MARKER.to_string();
        let at = match after {
            Some(i) if i < self.records.len() => i + 1,
            _ => self.records.len(),
        };
        self.records.insert(at, record);
    }

    /// Swap one side's value with the adjacent row. No-op at the sequence
    /// boundaries. Each touched row is reclassified `Edited` unless its
    /// swapped-in value is the blank marker.
    pub fn move_value(&mut self, index: usize, side: Side, direction: MoveDirection) {
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return;
                }
                index - 1
            }
            MoveDirection::Down => index + 1,
        };
        if index >= self.records.len() || target >= self.records.len() {
            return;
        }

        let taken = std::mem::take(self.records[index].side_mut(side));
        let swapped = std::mem::replace(self.records[target].side_mut(side), taken);
        *self.records[index].side_mut(side) = swapped;

        for i in [index, target] {
            if self.records[i].side(side) != BLANK_MARKER {
                self.records[i].classification = Classification::Edited;
            }
        }
    }

    /// Delete one side of a row. When the opposite side is empty or the
    /// blank marker the whole row is removed, so no row survives with both
    /// sides empty; otherwise only the named side is cleared and the row is
    /// reclassified `Edited`.
    pub fn delete(&mut self, index: usize, side: Side) {
        let Some(record) = self.records.get_mut(index) else {
            return;
        };
        let opposite = record.side(side.opposite());
        if opposite.is_empty() || opposite == BLANK_MARKER {
            self.records.remove(index);
        } else {
            record.side_mut(side).clear();
            record.classification = Classification::Edited;
        }
    }

    /// Commit a free-text edit. Returns true when the stored text actually
    /// changed (the caller must then drop any highlight state).
    pub fn edit(&mut self, index: usize, side: Side, new_text: &str) -> bool {
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        if record.side(side) == new_text {
            return false;
        }
        *record.side_mut(side) = new_text.to_string();
        record.classification = Classification::Edited;
        true
    }
}
