pub mod highlight;
pub mod normalize;
mod store;
mod types;
mod ui;

use crate::compare;
use egui::Ui;
use tracing::info;

pub use highlight::{RowDisplay, Segment, SegmentKind, Verdict};
pub use store::RecordStore;
pub use types::{Classification, ComparisonRecord, MoveDirection, RawRecord, Side};

/// The alignment & diff grid.
///
/// Owns the record store and the derived highlight state. All mutations run
/// synchronously on the UI thread; highlight state is dropped whenever a
/// mutation touches the sequence and re-derived on demand by
/// [`ReviewGrid::classify_rows`].
#[derive(Default)]
pub struct ReviewGrid {
    store: RecordStore,
    display: Option<Vec<Option<RowDisplay>>>,
    focused_row: Option<usize>,
    editing: Option<EditDraft>,
}

/// In-progress free-text edit. The store only changes when the cell loses
/// focus, so typing a character and deleting it again commits nothing.
struct EditDraft {
    row: usize,
    side: Side,
    text: String,
}

impl ReviewGrid {
    /// Load a payload. Two shapes are accepted: a record array (loaded as
    /// is) or a paired question-list object (run through the comparison
    /// builder first). Anything else leaves the grid empty.
    pub fn load_payload(&mut self, raw: &str) {
        self.clear_highlights();
        self.focused_row = None;
        self.editing = None;
        if let Ok(paired) = serde_json::from_str::<compare::PairedPayload>(raw) {
            info!(
                expected = paired.preguntas_esperadas.len(),
                actual = paired.preguntas_actuales.len(),
                "building records from paired question payload"
            );
            self.store.load_records(compare::build_records(
                &paired.preguntas_esperadas,
                &paired.preguntas_actuales,
            ));
        } else {
            self.store.load(raw);
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn records(&self) -> &[ComparisonRecord] {
        self.store.records()
    }

    /// Insert a placeholder after the last focused row (appended when none).
    pub fn add_placeholder(&mut self, side: Side) {
        self.store.insert_placeholder(self.focused_row, side);
        // row indices shift, any pending draft is stale
        self.editing = None;
        self.clear_highlights();
    }

    /// Commit a finished free-text edit. Highlight state is dropped only
    /// when the stored text actually changed.
    pub fn commit_edit(&mut self, index: usize, side: Side, text: &str) {
        if self.store.edit(index, side, text) {
            self.clear_highlights();
        }
    }

    /// Re-derive the per-row display state. Idempotent; always supersedes
    /// any previous highlight state.
    pub fn classify_rows(&mut self) {
        self.display = Some(highlight::classify(self.store.records()));
    }

    /// Drop highlight state; cells return to their stored plain text. The
    /// stored classification tags are untouched.
    pub fn clear_highlights(&mut self) {
        self.display = None;
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui::show_grid(ui, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committing_unchanged_text_keeps_row_pristine() {
        let mut grid = ReviewGrid::default();
        grid.load_payload(r#"[{"expected": "A", "actual": "A", "diff_type": "none"}]"#);
        grid.classify_rows();

        // typing a character and deleting it again ends with the original
        // text at the commit point, so nothing changes
        grid.commit_edit(0, Side::Expected, "A");
        assert_eq!(grid.records()[0].classification, Classification::None);
        assert!(grid.display.is_some());

        grid.commit_edit(0, Side::Expected, "A2");
        assert_eq!(grid.records()[0].classification, Classification::Edited);
        assert!(grid.display.is_none());
    }
}
