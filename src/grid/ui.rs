//! Projection of the record store into the visual grid.
//!
//! The store is the only source of truth: every frame rebuilds the three
//! columns (index, expected, actual) from it, and structural mutations are
//! collected as typed actions during the pass and applied afterwards, so
//! the sequence is never modified mid-render.

use super::highlight::{RowDisplay, Segment, SegmentKind, Verdict};
use super::types::{MoveDirection, Side};
use super::{EditDraft, ReviewGrid};
use egui::{Color32, FontId, RichText, TextFormat, Ui, text::LayoutJob};
use tracing::warn;

const MATCH_COLOR: Color32 = Color32::from_rgb(0, 100, 0);
const SUBTLE_COLOR: Color32 = Color32::from_rgb(170, 110, 0);
const MISMATCH_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const MISSING_WORD_BG: Color32 = Color32::from_rgb(255, 170, 170);
const EXTRA_WORD_BG: Color32 = Color32::from_rgb(170, 255, 170);
const MARKER_COLOR: Color32 = Color32::from_rgb(200, 60, 60);

/// Mutation requested from within the render pass.
enum GridAction {
    Move(usize, Side, MoveDirection),
    Delete(usize, Side),
    Edit(usize, Side, String),
    ClearHighlights,
}

pub(super) fn show_grid(ui: &mut Ui, grid: &mut ReviewGrid) {
    let mut action: Option<GridAction> = None;

    // Two text columns share the space left of the index column.
    let col_w = ((ui.available_width() - 60.0) / 2.0 - 15.0).max(120.0);

    egui::Grid::new("review_grid")
        .num_columns(3)
        .striped(true)
        .min_col_width(0.0)
        .show(ui, |ui| {
            ui.label(RichText::new("#").strong());
            ui.label(RichText::new("Esperado").strong());
            ui.label(RichText::new("Actual").strong());
            ui.end_row();

            let row_count = grid.store.len();
            for index in 0..row_count {
                let row_display = match &grid.display {
                    Some(displays) => match displays.get(index) {
                        Some(display) => display.as_ref(),
                        None => {
                            // Stale display list, shorter than the store.
                            warn!(row = index, "no display state for row, rendering plain");
                            None
                        }
                    },
                    None => None,
                };

                index_cell(ui, index, row_display);

                for side in [Side::Expected, Side::Actual] {
                    if grid.store.records()[index].side(side) == crate::constant::BLANK_MARKER {
                        placeholder_cell(ui, index, side, &mut action);
                    } else if let Some(display) = row_display.filter(|d| d.verdict != Verdict::Match)
                    {
                        let segments = match side {
                            Side::Expected => &display.expected,
                            Side::Actual => &display.actual,
                        };
                        segments_cell(ui, segments, display.verdict, col_w, &mut action);
                    } else {
                        // Edits accumulate in a draft and only reach the
                        // store when the cell loses focus; an unchanged
                        // commit is a no-op there.
                        let mut buffer = match &grid.editing {
                            Some(draft) if draft.row == index && draft.side == side => {
                                draft.text.clone()
                            }
                            _ => grid.store.records()[index].side(side).to_string(),
                        };
                        let response = ui.add(
                            egui::TextEdit::multiline(&mut buffer)
                                .desired_rows(1)
                                .desired_width(col_w),
                        );
                        if response.has_focus() {
                            grid.focused_row = Some(index);
                        }
                        if response.changed() {
                            grid.editing = Some(EditDraft {
                                row: index,
                                side,
                                text: buffer,
                            });
                        }
                        if response.lost_focus()
                            && let Some(draft) = grid
                                .editing
                                .take_if(|d| d.row == index && d.side == side)
                        {
                            action = Some(GridAction::Edit(draft.row, draft.side, draft.text));
                        }
                    }
                }
                ui.end_row();
            }
        });

    match action {
        Some(GridAction::Move(index, side, direction)) => {
            grid.store.move_value(index, side, direction);
            grid.editing = None;
            grid.clear_highlights();
        }
        Some(GridAction::Delete(index, side)) => {
            grid.store.delete(index, side);
            grid.focused_row = None;
            grid.editing = None;
            grid.clear_highlights();
        }
        Some(GridAction::Edit(index, side, text)) => grid.commit_edit(index, side, &text),
        Some(GridAction::ClearHighlights) => grid.clear_highlights(),
        None => {}
    }
}

fn index_cell(ui: &mut Ui, index: usize, display: Option<&RowDisplay>) {
    let number = format!("{}", index + 1);
    match display.map(|d| d.verdict) {
        Some(Verdict::Match) => {
            ui.label(RichText::new(format!("{number} ✔")).color(MATCH_COLOR));
        }
        Some(Verdict::Subtle) => {
            ui.label(RichText::new(format!("{number} ~")).color(SUBTLE_COLOR));
        }
        Some(Verdict::Mismatch) => {
            ui.label(RichText::new(format!("{number} ✘")).color(MISMATCH_COLOR));
        }
        None => {
            ui.label(RichText::new(number).weak());
        }
    }
}

fn placeholder_cell(ui: &mut Ui, index: usize, side: Side, action: &mut Option<GridAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("— en blanco —").italics().weak());
        if ui.small_button("⬆").on_hover_text("Subir").clicked() {
            *action = Some(GridAction::Move(index, side, MoveDirection::Up));
        }
        if ui.small_button("⬇").on_hover_text("Bajar").clicked() {
            *action = Some(GridAction::Move(index, side, MoveDirection::Down));
        }
        if ui.small_button("❌").on_hover_text("Eliminar").clicked() {
            *action = Some(GridAction::Delete(index, side));
        }
    });
}

/// Read-only rendering of a highlighted cell. Clicking it drops the
/// highlight state and returns the cell to plain editable text.
fn segments_cell(
    ui: &mut Ui,
    segments: &[Segment],
    verdict: Verdict,
    width: f32,
    action: &mut Option<GridAction>,
) {
    let font_id = FontId::proportional(14.0);
    let base_color = match verdict {
        Verdict::Subtle => SUBTLE_COLOR,
        _ => MISMATCH_COLOR,
    };

    let mut job = LayoutJob::default();
    for segment in segments {
        match segment.kind {
            SegmentKind::Plain => job.append(
                &segment.text,
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: ui.visuals().text_color(),
                    ..Default::default()
                },
            ),
            SegmentKind::Missing => job.append(
                &segment.text,
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: base_color,
                    background: MISSING_WORD_BG,
                    ..Default::default()
                },
            ),
            SegmentKind::Extra => job.append(
                &segment.text,
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: base_color,
                    background: EXTRA_WORD_BG,
                    ..Default::default()
                },
            ),
            // Zero-width in the data; the renderer supplies the glyph.
            SegmentKind::Marker => job.append(
                "▏",
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: MARKER_COLOR,
                    ..Default::default()
                },
            ),
        }
    }
    job.wrap.max_width = width;

    let response = ui.add(egui::Label::new(job).sense(egui::Sense::click()));
    if response
        .on_hover_text("Editar (quita el resaltado)")
        .clicked()
    {
        *action = Some(GridAction::ClearHighlights);
    }
}
