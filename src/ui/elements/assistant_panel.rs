// src/ui/elements/assistant_panel.rs
//
// The assistant side panel: staged analysis narration, the findings report
// grouped by category, and the follow-up chat thread. The panel width and
// the chat height resize through custom drag handles so the dimensions can
// be clamped continuously and persisted once on release.
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::assistant::engine::{AssistantDisplayMode, ThinkingSequence};
use crate::assistant::plugin::{AssistantState, ChatMessageSubmitted};
use crate::review::definitions::MessageRole;
use crate::review::events::{IssueActionEvent, MarkIssueCorrectRequest};
use crate::review::resources::ReviewRegistry;
use crate::settings::{
    self, FilePrefStore, PanelLayout, KEY_CHAT_MINIMIZED, KEY_CHAT_PANEL_HEIGHT,
    KEY_SIDE_PANEL_WIDTH,
};

use super::issue_card::show_issue_card;
use super::workspace::persist_dimension_on_release;

const CHAT_HEADER_HEIGHT: f32 = 30.0;

#[allow(clippy::too_many_arguments)]
pub fn show_assistant_panel(
    ctx: &egui::Context,
    state: &mut super::workspace::WorkspaceState,
    assistant: &mut AssistantState,
    registry: &ReviewRegistry,
    mark_correct_writer: &mut EventWriter<MarkIssueCorrectRequest>,
    action_writer: &mut EventWriter<IssueActionEvent>,
    chat_writer: &mut EventWriter<ChatMessageSubmitted>,
) {
    egui::SidePanel::right("assistant_panel")
        .exact_width(state.side_panel_width)
        .resizable(false)
        .show(ctx, |ui| {
            resize_width_handle(ui, state);

            let show_chat = matches!(
                assistant.display_mode,
                AssistantDisplayMode::Report | AssistantDisplayMode::Recap
            );
            let chat_height = if !show_chat {
                0.0
            } else if state.chat_minimized {
                CHAT_HEADER_HEIGHT
            } else {
                state.chat_panel_height
            };
            let body_height = (ui.available_height() - chat_height - 12.0).max(60.0);

            egui::ScrollArea::vertical()
                .id_salt("assistant_body")
                .max_height(body_height)
                .auto_shrink([false, false])
                .show(ui, |ui| match assistant.display_mode {
                    AssistantDisplayMode::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Preparing analysis…");
                        });
                    }
                    AssistantDisplayMode::Thinking => {
                        if let Some(thinking) = &assistant.thinking {
                            show_thinking_trace(ui, thinking, false);
                        }
                    }
                    AssistantDisplayMode::Report => {
                        show_report(ui, state, assistant, registry, mark_correct_writer, action_writer);
                    }
                    AssistantDisplayMode::Recap => {
                        if ui.small_button("← Back to report").clicked() {
                            assistant.display_mode = AssistantDisplayMode::Report;
                        }
                        // The live sequence is gone once the panel closed;
                        // the recap renders every stage complete from the
                        // stage definitions, no timers involved.
                        let sequence = assistant
                            .thinking
                            .clone()
                            .unwrap_or_else(ThinkingSequence::new);
                        show_thinking_trace(ui, &sequence, true);
                    }
                });

            if show_chat {
                show_chat_section(ui, state, assistant, chat_writer);
            }
        });
}

/// Thin drag strip along the panel's left edge. Dragging left widens the
/// panel; the width is clamped every frame and saved when the drag ends.
fn resize_width_handle(ui: &mut egui::Ui, state: &mut super::workspace::WorkspaceState) {
    let panel_rect = ui.max_rect();
    let handle_rect = egui::Rect::from_min_max(
        panel_rect.left_top(),
        egui::pos2(panel_rect.left() + 6.0, panel_rect.bottom()),
    );
    let resp = ui.interact(
        handle_rect,
        ui.id().with("panel_width_drag"),
        egui::Sense::drag(),
    );
    if resp.hovered() || resp.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    }
    if resp.dragged() {
        state.side_panel_width =
            PanelLayout::clamp_side_width(state.side_panel_width - resp.drag_delta().x);
    }
    persist_dimension_on_release(&resp, KEY_SIDE_PANEL_WIDTH, state.side_panel_width);
}

fn show_thinking_trace(ui: &mut egui::Ui, sequence: &ThinkingSequence, recap: bool) {
    ui.heading("Analyzing the return");
    ui.add_space(4.0);
    for view in sequence.stage_views(recap) {
        ui.horizontal(|ui| {
            if view.complete {
                ui.colored_label(egui::Color32::from_rgb(0x30, 0x90, 0x40), "✔");
            } else if view.active {
                ui.spinner();
            } else {
                ui.weak("○");
            }
            ui.strong(view.title);
        });
        if !view.text.is_empty() {
            ui.indent(view.title, |ui| {
                ui.label(&view.text);
            });
        }
        ui.add_space(6.0);
    }
}

fn show_report(
    ui: &mut egui::Ui,
    state: &mut super::workspace::WorkspaceState,
    assistant: &mut AssistantState,
    registry: &ReviewRegistry,
    mark_correct_writer: &mut EventWriter<MarkIssueCorrectRequest>,
    action_writer: &mut EventWriter<IssueActionEvent>,
) {
    ui.horizontal(|ui| {
        ui.heading("Review findings");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("View analysis").clicked() {
                assistant.display_mode = AssistantDisplayMode::Recap;
            }
        });
    });

    let total = registry.issues().len();
    let addressed = total - registry.open_issue_count();
    ui.add(
        egui::ProgressBar::new(registry.progress_percent() as f32 / 100.0)
            .text(format!("{} of {} findings addressed", addressed, total)),
    );
    ui.add_space(6.0);

    for (category, issues) in registry.issues_by_category() {
        if issues.is_empty() {
            continue;
        }
        let open = issues
            .iter()
            .filter(|i| i.status == crate::review::definitions::IssueStatus::Open)
            .count();
        ui.horizontal(|ui| {
            ui.strong(category.label());
            if open == 0 {
                ui.colored_label(egui::Color32::from_rgb(0x30, 0x90, 0x40), "✔ complete");
            } else {
                ui.weak(format!("{} open", open));
            }
        });
        for issue in issues {
            show_issue_card(ui, state, issue, mark_correct_writer, action_writer);
        }
        ui.add_space(8.0);
    }
}

fn show_chat_section(
    ui: &mut egui::Ui,
    state: &mut super::workspace::WorkspaceState,
    assistant: &mut AssistantState,
    chat_writer: &mut EventWriter<ChatMessageSubmitted>,
) {
    ui.separator();

    // Horizontal drag strip above the chat header resizes its height.
    if !state.chat_minimized {
        let resp = ui.allocate_response(
            egui::vec2(ui.available_width(), 6.0),
            egui::Sense::drag(),
        );
        if resp.hovered() || resp.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical);
        }
        if resp.dragged() {
            state.chat_panel_height =
                PanelLayout::clamp_chat_height(state.chat_panel_height - resp.drag_delta().y);
        }
        persist_dimension_on_release(&resp, KEY_CHAT_PANEL_HEIGHT, state.chat_panel_height);
    }

    ui.horizontal(|ui| {
        ui.strong("Ask a follow-up");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if state.chat_minimized { "Expand" } else { "Minimize" };
            if ui.small_button(label).clicked() {
                state.chat_minimized = !state.chat_minimized;
                settings::save_flag(&FilePrefStore, KEY_CHAT_MINIMIZED, state.chat_minimized);
            }
        });
    });
    if state.chat_minimized {
        return;
    }

    let waiting = assistant.chat.is_waiting();
    let log_height = (state.chat_panel_height - 96.0).max(40.0);

    egui::ScrollArea::vertical()
        .id_salt("assistant_chat_log")
        .max_height(log_height)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in assistant.chat.messages() {
                match message.role {
                    MessageRole::User => {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            ui.label(egui::RichText::new(&message.text).strong());
                        });
                    }
                    MessageRole::Assistant => {
                        for block in &message.blocks {
                            ui.label(block);
                            ui.add_space(2.0);
                        }
                    }
                }
                ui.add_space(4.0);
            }
            if waiting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("Assistant is typing…");
                });
            }
        });

    if !waiting {
        ui.horizontal_wrapped(|ui| {
            let mut send_suggestion = None;
            for suggestion in &assistant.suggestions {
                if ui.small_button(suggestion).clicked() {
                    send_suggestion = Some(suggestion.clone());
                }
            }
            if let Some(text) = send_suggestion {
                chat_writer.write(ChatMessageSubmitted { text });
            }
        });
    }

    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(&mut assistant.chat_input)
                .hint_text("Ask about this return…")
                .desired_width(ui.available_width() - 60.0),
        );
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let can_send = !waiting && !assistant.chat_input.trim().is_empty();
        let send_clicked = ui.add_enabled(can_send, egui::Button::new("Send")).clicked();
        if send_clicked || (submitted && can_send) {
            chat_writer.write(ChatMessageSubmitted {
                text: assistant.chat_input.clone(),
            });
            assistant.chat_input.clear();
            input.request_focus();
        }
    });
}
