// src/ui/elements/issue_card.rs
//
// A single finding in the assistant report. Collapsed cards show the
// severity and title; expanding one highlights its affected form lines and
// scrolls the first into view.
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::review::definitions::{
    format_amount, IssueAction, IssueStatus, ReviewIssue, Severity,
};
use crate::review::events::{IssueActionEvent, MarkIssueCorrectRequest};

use super::workspace::WorkspaceState;

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::High => egui::Color32::from_rgb(0xc0, 0x3a, 0x2e),
        Severity::Medium => egui::Color32::from_rgb(0xc8, 0x88, 0x10),
        Severity::Low => egui::Color32::GRAY,
    }
}

pub fn show_issue_card(
    ui: &mut egui::Ui,
    state: &mut WorkspaceState,
    issue: &ReviewIssue,
    mark_correct_writer: &mut EventWriter<MarkIssueCorrectRequest>,
    action_writer: &mut EventWriter<IssueActionEvent>,
) {
    let expanded = state.expanded_issue.as_deref() == Some(issue.id.as_str());

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let header = ui.horizontal(|ui| {
            ui.colored_label(severity_color(issue.severity), issue.severity.label());
            ui.strong(&issue.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if issue.status == IssueStatus::Correct {
                    ui.colored_label(egui::Color32::from_rgb(0x30, 0x90, 0x40), "✔ Correct");
                }
            });
        });
        if header
            .response
            .interact(egui::Sense::click())
            .clicked()
        {
            if expanded {
                state.expanded_issue = None;
                state.highlighted_fields.clear();
            } else {
                state.expanded_issue = Some(issue.id.clone());
                state.highlighted_fields = issue.affected_fields.clone();
                state.scroll_to_field = issue.affected_fields.first().cloned();
                state.note_target_issue = None;
                state.copy_status.clear();
            }
        }

        if !expanded {
            ui.weak(&issue.description);
            return;
        }

        ui.label(&issue.description);
        ui.add_space(4.0);
        ui.label(&issue.explanation);

        if !issue.details.is_empty() {
            ui.add_space(4.0);
            egui::Grid::new(format!("issue_details_{}", issue.id))
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    for detail in &issue.details {
                        ui.weak(&detail.label);
                        ui.label(&detail.value);
                        ui.end_row();
                    }
                });
        }

        if !issue.missing_documents.is_empty() {
            ui.add_space(4.0);
            ui.weak("Missing documents:");
            for name in &issue.missing_documents {
                ui.label(format!("• {}", name));
            }
        }

        if let Some(penalty) = &issue.penalty {
            ui.add_space(4.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.strong(format!(
                    "Estimated penalty: {}",
                    format_amount(penalty.amount)
                ));
                if ui.small_button("Copy calculation").clicked() {
                    ui.ctx().copy_text(penalty.calculation.clone());
                    state.copy_status = "Calculation copied to clipboard.".to_string();
                }
            });
            if !state.copy_status.is_empty() {
                ui.weak(&state.copy_status);
            }
            ui.weak(&penalty.calculation);
            if let (Some(threshold), Some(withholding)) =
                (penalty.safe_harbor_threshold, penalty.current_withholding)
            {
                ui.label(format!(
                    "Safe harbor {} vs. withheld {}",
                    format_amount(threshold),
                    format_amount(withholding)
                ));
            }
            if let Some(quarterly) = penalty.suggested_quarterly_payment {
                ui.label(format!(
                    "Suggested estimated payment: {} per quarter",
                    format_amount(quarterly)
                ));
            }
        }

        ui.add_space(4.0);
        ui.weak(format!("Suggested action: {}", issue.suggested_action));

        ui.horizontal_wrapped(|ui| {
            if !issue.affected_fields.is_empty() && ui.small_button("View sources").clicked() {
                action_writer.write(IssueActionEvent {
                    issue_id: issue.id.clone(),
                    action: IssueAction::ViewSources,
                });
                state.highlighted_fields = issue.affected_fields.clone();
                state.scroll_to_field = issue.affected_fields.first().cloned();
            }
            if ui.small_button("View document").clicked() {
                action_writer.write(IssueActionEvent {
                    issue_id: issue.id.clone(),
                    action: IssueAction::ViewDocument,
                });
            }
            if issue.penalty.is_some() && ui.small_button("View calculation").clicked() {
                action_writer.write(IssueActionEvent {
                    issue_id: issue.id.clone(),
                    action: IssueAction::ViewCalculation,
                });
            }
        });

        match issue.status {
            IssueStatus::Open => {
                let noting = state.note_target_issue.as_deref() == Some(issue.id.as_str());
                if noting {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut state.resolution_note_input)
                                .hint_text("Optional note")
                                .desired_width(180.0),
                        );
                        if ui.button("Confirm correct").clicked() {
                            let note = if state.resolution_note_input.trim().is_empty() {
                                None
                            } else {
                                Some(state.resolution_note_input.clone())
                            };
                            mark_correct_writer.write(MarkIssueCorrectRequest {
                                issue_id: issue.id.clone(),
                                note,
                            });
                            state.note_target_issue = None;
                            state.resolution_note_input.clear();
                        }
                        if ui.button("Cancel").clicked() {
                            state.note_target_issue = None;
                            state.resolution_note_input.clear();
                        }
                    });
                } else if ui.button("Mark correct").clicked() {
                    state.note_target_issue = Some(issue.id.clone());
                    state.resolution_note_input.clear();
                }
            }
            IssueStatus::Correct | IssueStatus::Resolved => {
                if let Some(note) = &issue.resolution_note {
                    ui.weak(format!("Note: {}", note));
                }
            }
        }
    });
}
