// src/ui/elements/form_table.rs
//
// The Form 1040 line table. Clicking a line label anchors the source
// popover to it; lines affected by the expanded issue render selected.
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::review::definitions::{format_amount, CorrectionStatus};
use crate::review::resources::ReviewRegistry;

use super::workspace::WorkspaceState;

const ROW_HEIGHT: f32 = 26.0;

pub fn show_form_table(
    ui: &mut egui::Ui,
    state: &mut WorkspaceState,
    registry: &ReviewRegistry,
) {
    let fields = registry.fields();
    let mut clear_scroll_target = false;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::initial(280.0).at_least(180.0))
        .column(Column::initial(110.0))
        .column(Column::initial(110.0))
        .column(Column::initial(80.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Line");
            });
            header.col(|ui| {
                ui.strong("Amount");
            });
            header.col(|ui| {
                ui.strong("Prior year");
            });
            header.col(|ui| {
                ui.strong("Change");
            });
            header.col(|ui| {
                ui.strong("Status");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, fields.len(), |mut row| {
                let field = &fields[row.index()];
                let highlighted = state.highlighted_fields.iter().any(|id| id == &field.id);
                row.set_selected(highlighted);

                row.col(|ui| {
                    let label = egui::Label::new(&field.label).sense(egui::Sense::click());
                    let resp = ui.add(label).on_hover_text("Show source documents");
                    if state.scroll_to_field.as_deref() == Some(field.id.as_str()) {
                        resp.scroll_to_me(Some(egui::Align::Center));
                        clear_scroll_target = true;
                    }
                    if resp.clicked() {
                        if state.popover_field.as_deref() == Some(field.id.as_str()) {
                            state.popover_field = None;
                            state.source_edit_inputs.clear();
                        } else {
                            state.popover_field = Some(field.id.clone());
                            state.popover_anchor = resp.rect;
                            state.source_edit_inputs.clear();
                        }
                    } else if state.popover_field.as_deref() == Some(field.id.as_str()) {
                        // Keep the anchor tracking the row across relayouts.
                        state.popover_anchor = resp.rect;
                    }
                });
                row.col(|ui| {
                    ui.monospace(field.current_value.to_string());
                });
                row.col(|ui| {
                    match field.prior_year_value {
                        Some(prior) => ui.monospace(format_amount(prior)),
                        None => ui.weak("—"),
                    };
                });
                row.col(|ui| {
                    match field.percent_change {
                        Some(change) => {
                            let text = format!("{:+.1}%", change);
                            let color = if change.abs() >= 20.0 {
                                egui::Color32::from_rgb(0xd0, 0x60, 0x30)
                            } else {
                                ui.style().visuals.text_color()
                            };
                            ui.colored_label(color, text)
                        }
                        None => ui.weak("—"),
                    };
                });
                row.col(|ui| {
                    if field.needs_manual_review {
                        ui.colored_label(egui::Color32::from_rgb(0xc8, 0x88, 0x10), "Needs review");
                    } else if field.correction_status == CorrectionStatus::Corrected {
                        ui.colored_label(egui::Color32::from_rgb(0x30, 0x90, 0x40), "Corrected");
                    } else {
                        ui.weak("OK");
                    }
                });
            });
        });

    if clear_scroll_target {
        state.scroll_to_field = None;
    }
}
