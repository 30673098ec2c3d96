// src/ui/elements/workspace.rs
//
// The workspace orchestrator: the single egui system composing the form
// table, the assistant side panel, the documents tray, and the field
// popover. All registry mutations leave here as request events; this module
// never writes shared state directly.
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::collections::HashMap;

use crate::assistant::plugin::{AssistantState, ChatMessageSubmitted};
use crate::review::events::{
    BeginDocumentImportRequest, EditSourceValueRequest, ExportSnapshotRequest, IssueActionEvent,
    MarkFieldReviewedRequest, MarkIssueCorrectRequest, SetDocumentReviewedRequest,
};
use crate::review::resources::ReviewRegistry;
use crate::settings::{self, FilePrefStore, PanelLayout};
use crate::ui::UiFeedbackState;

use super::assistant_panel::show_assistant_panel;
use super::documents_panel::show_documents_panel;
use super::field_popover::show_field_popover;
use super::form_table::show_form_table;

#[derive(Resource)]
pub struct WorkspaceState {
    /// Field ids highlighted by the currently expanded issue.
    pub highlighted_fields: Vec<String>,
    pub expanded_issue: Option<String>,
    /// One-shot scroll target set when an issue highlights a field.
    pub scroll_to_field: Option<String>,

    // Field source popover
    pub popover_field: Option<String>,
    pub popover_anchor: egui::Rect,
    /// Edit buffers per source document id while the popover is open.
    pub source_edit_inputs: HashMap<String, String>,

    // Mark-correct note entry
    pub note_target_issue: Option<String>,
    pub resolution_note_input: String,

    /// Transient status after copying the penalty calculation.
    pub copy_status: String,

    pub show_documents_panel: bool,

    // Live layout dimensions; clamped continuously during drags and
    // persisted once on release.
    pub side_panel_width: f32,
    pub chat_panel_height: f32,
    pub chat_minimized: bool,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        let layout = PanelLayout::default();
        WorkspaceState {
            highlighted_fields: Vec::new(),
            expanded_issue: None,
            scroll_to_field: None,
            popover_field: None,
            popover_anchor: egui::Rect::NOTHING,
            source_edit_inputs: HashMap::new(),
            note_target_issue: None,
            resolution_note_input: String::new(),
            copy_status: String::new(),
            show_documents_panel: false,
            side_panel_width: layout.side_panel_width as f32,
            chat_panel_height: layout.chat_panel_height as f32,
            chat_minimized: layout.chat_minimized,
        }
    }
}

/// Startup: restore the persisted panel layout, falling back to defaults on
/// anything malformed.
pub fn restore_panel_layout(mut state: ResMut<WorkspaceState>) {
    let layout = PanelLayout::load(&FilePrefStore);
    info!(
        "Restored panel layout: side {}px, chat {}px, minimized {}.",
        layout.side_panel_width, layout.chat_panel_height, layout.chat_minimized
    );
    state.side_panel_width = layout.side_panel_width as f32;
    state.chat_panel_height = layout.chat_panel_height as f32;
    state.chat_minimized = layout.chat_minimized;
}

#[allow(clippy::too_many_arguments)]
pub fn review_workspace_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<WorkspaceState>,
    mut assistant: ResMut<AssistantState>,
    registry: Res<ReviewRegistry>,
    ui_feedback: Res<UiFeedbackState>,
    mut edit_source_writer: EventWriter<EditSourceValueRequest>,
    mut mark_correct_writer: EventWriter<MarkIssueCorrectRequest>,
    mut field_reviewed_writer: EventWriter<MarkFieldReviewedRequest>,
    mut doc_reviewed_writer: EventWriter<SetDocumentReviewedRequest>,
    mut import_writer: EventWriter<BeginDocumentImportRequest>,
    mut action_writer: EventWriter<IssueActionEvent>,
    mut export_writer: EventWriter<ExportSnapshotRequest>,
    mut chat_writer: EventWriter<ChatMessageSubmitted>,
) {
    let ctx = contexts.ctx_mut();

    show_header_panel(ctx, &mut state, &mut assistant, &registry, &mut export_writer);

    if assistant.panel_open {
        show_assistant_panel(
            ctx,
            &mut state,
            &mut assistant,
            &registry,
            &mut mark_correct_writer,
            &mut action_writer,
            &mut chat_writer,
        );
    }

    if state.show_documents_panel {
        show_documents_panel(
            ctx,
            &registry,
            &mut doc_reviewed_writer,
            &mut import_writer,
        );
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Form 1040 — Individual Income Tax Return");
        ui.label(
            egui::RichText::new("Dana Whitfield · Tax year 2024 · Filing single")
                .weak(),
        );
        if !ui_feedback.last_message.is_empty() {
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
        ui.separator();

        show_form_table(ui, &mut state, &registry);
    });

    // The popover overlays everything else, so it renders last.
    show_field_popover(
        ctx,
        &mut state,
        &registry,
        &mut edit_source_writer,
        &mut field_reviewed_writer,
    );
}

fn show_header_panel(
    ctx: &egui::Context,
    state: &mut WorkspaceState,
    assistant: &mut AssistantState,
    registry: &ReviewRegistry,
    export_writer: &mut EventWriter<ExportSnapshotRequest>,
) {
    egui::TopBottomPanel::top("workspace_header_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("ReturnLens").strong().size(16.0));
            ui.separator();
            let open = registry.open_issue_count();
            if open > 0 {
                ui.label(format!("{} open issue(s)", open));
            } else if !registry.issues().is_empty() {
                ui.label("All issues addressed");
            }
            ui.label(format!("Review {}% complete", registry.progress_percent()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if assistant.panel_open {
                    "Close Assistant"
                } else {
                    "Assistant Review"
                };
                if ui.button(label).clicked() {
                    assistant.panel_open = !assistant.panel_open;
                }
                if ui
                    .selectable_label(state.show_documents_panel, "Documents")
                    .clicked()
                {
                    state.show_documents_panel = !state.show_documents_panel;
                }
                if ui.button("Export snapshot").clicked() {
                    export_writer.write(ExportSnapshotRequest);
                }
            });
        });
    });
}

/// Shared drag-handle behavior for panel resizing: clamps continuously
/// during the drag, persists once on release.
pub fn persist_dimension_on_release(
    response: &egui::Response,
    key: &'static str,
    value: f32,
) {
    if response.drag_stopped() {
        settings::save(&FilePrefStore, key, value.round() as i32);
    }
}
