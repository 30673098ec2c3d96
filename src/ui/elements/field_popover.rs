// src/ui/elements/field_popover.rs
//
// Floating source-detail popover anchored to a form line. Placement comes
// from `ui::placement::place_popover`; edits leave as request events.
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::review::definitions::format_amount;
use crate::review::events::{EditSourceValueRequest, MarkFieldReviewedRequest};
use crate::review::resources::ReviewRegistry;
use crate::ui::placement::place_popover;

use super::workspace::WorkspaceState;

const POPOVER_WIDTH: f32 = 360.0;

pub fn show_field_popover(
    ctx: &egui::Context,
    state: &mut WorkspaceState,
    registry: &ReviewRegistry,
    edit_writer: &mut EventWriter<EditSourceValueRequest>,
    reviewed_writer: &mut EventWriter<MarkFieldReviewedRequest>,
) {
    let Some(field_id) = state.popover_field.clone() else {
        return;
    };
    let Some(field) = registry.get_field(&field_id) else {
        state.popover_field = None;
        return;
    };

    // Estimated size drives placement; rendering may differ by a few pixels
    // but clamping keeps the popover on screen either way.
    let estimated_height = 86.0
        + 64.0 * field.sources.len() as f32
        + 20.0 * field.component_fields.len() as f32
        + if field.needs_manual_review { 30.0 } else { 0.0 };
    let size = egui::Vec2::new(POPOVER_WIDTH, estimated_height.min(420.0));
    let pos = place_popover(state.popover_anchor, ctx.screen_rect(), size);

    let mut close_requested = false;
    egui::Area::new(egui::Id::new("field_source_popover"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(POPOVER_WIDTH);
                ui.horizontal(|ui| {
                    ui.strong(&field.label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            close_requested = true;
                        }
                    });
                });
                ui.label(format!("Reported amount: {}", field.current_value));
                ui.separator();

                if field.sources.is_empty() {
                    ui.weak("No source documents back this line.");
                } else {
                    for source in &field.sources {
                        ui.horizontal(|ui| {
                            ui.label(&source.document_name);
                            ui.weak(format!(
                                "{} · page {} · {}% confidence",
                                source.document_type.label(),
                                source.page,
                                source.confidence
                            ));
                        });
                        if let Some(box_label) = &source.field_label {
                            ui.weak(box_label);
                        }
                        ui.horizontal(|ui| {
                            let buffer = state
                                .source_edit_inputs
                                .entry(source.document_id.clone())
                                .or_insert_with(|| source.extracted_value.clone());
                            ui.add(
                                egui::TextEdit::singleline(buffer).desired_width(140.0),
                            );
                            let changed = buffer.trim() != source.extracted_value;
                            if ui
                                .add_enabled(changed, egui::Button::new("Apply"))
                                .clicked()
                            {
                                edit_writer.write(EditSourceValueRequest {
                                    field_id: field.id.clone(),
                                    document_id: source.document_id.clone(),
                                    new_value: buffer.trim().to_string(),
                                });
                            }
                        });
                        ui.add_space(4.0);
                    }
                }

                if !field.component_fields.is_empty() {
                    ui.separator();
                    ui.weak("Computed from:");
                    for component_id in &field.component_fields {
                        if let Some(component) = registry.get_field(component_id) {
                            ui.label(format!(
                                "{} — {}",
                                component.label, component.current_value
                            ));
                        }
                    }
                    if let Some(total) = field.current_value.as_number() {
                        ui.weak(format!("Total: {}", format_amount(total)));
                    }
                }

                if field.needs_manual_review {
                    ui.separator();
                    if ui.button("Mark reviewed").clicked() {
                        reviewed_writer.write(MarkFieldReviewedRequest {
                            field_id: field.id.clone(),
                        });
                    }
                }
            });
        });

    if close_requested || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.popover_field = None;
        state.source_edit_inputs.clear();
    }
}
