// src/assistant/plugin.rs
use bevy::prelude::*;

use crate::review::events::ReviewOperationFeedback;
use crate::review::resources::ReviewRegistry;

use super::engine::{AssistantDisplayMode, ChatThread, ThinkingSequence};
use super::responses;

/// Session state for the assistant side panel. The chat thread lives here
/// rather than in the panel so an in-flight reply still appends (and is
/// visible on reopen) if the panel closes before its timer fires.
#[derive(Resource, Debug, Default)]
pub struct AssistantState {
    pub panel_open: bool,
    pub display_mode: AssistantDisplayMode,
    pub thinking: Option<ThinkingSequence>,
    /// Set once the one-shot thinking sequence has finished; reopening the
    /// trace afterwards renders the recap instead of re-running timers.
    pub thinking_finished: bool,
    pub chat: ChatThread,
    pub chat_input: String,
    pub suggestions: Vec<String>,
}

/// Sent by the chat input UI; the engine system applies it to the thread.
#[derive(Event, Debug, Clone)]
pub struct ChatMessageSubmitted {
    pub text: String,
}

/// Emitted once when the thinking sequence finishes and the panel flips to
/// the report.
#[derive(Event, Debug, Clone)]
pub struct ThinkingComplete;

pub struct AssistantPlugin;

impl Plugin for AssistantPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssistantState>()
            .add_event::<ChatMessageSubmitted>()
            .add_event::<ThinkingComplete>()
            .add_systems(
                Update,
                (
                    handle_chat_submissions,
                    drive_assistant,
                    announce_thinking_complete,
                    refresh_suggestions,
                )
                    .chain(),
            );

        info!("AssistantPlugin initialized.");
    }
}

fn handle_chat_submissions(
    mut events: EventReader<ChatMessageSubmitted>,
    mut state: ResMut<AssistantState>,
) {
    for ev in events.read() {
        if !state.chat.send(&ev.text) {
            debug!("Rejected empty chat submission.");
        }
    }
}

/// Advances both timed sequences from frame time. The chat thread advances
/// regardless of panel visibility; the thinking sequence only runs while the
/// panel shows it.
fn drive_assistant(
    time: Res<Time>,
    mut state: ResMut<AssistantState>,
    mut complete_writer: EventWriter<ThinkingComplete>,
) {
    let dt = time.delta();
    state.chat.advance(dt);

    if !state.panel_open {
        // Closing the panel discards in-flight thinking timers and resets
        // the display mode for the next open.
        if state.thinking.is_some() || state.display_mode != AssistantDisplayMode::Loading {
            state.thinking = None;
            state.display_mode = AssistantDisplayMode::Loading;
        }
        return;
    }

    match state.display_mode {
        AssistantDisplayMode::Loading => {
            if state.thinking_finished {
                state.display_mode = AssistantDisplayMode::Report;
            } else {
                info!("Assistant panel opened; starting analysis narration.");
                state.thinking = Some(ThinkingSequence::new());
                state.display_mode = AssistantDisplayMode::Thinking;
            }
        }
        AssistantDisplayMode::Thinking => {
            let finished = state
                .thinking
                .as_mut()
                .map(|seq| seq.advance(dt))
                .unwrap_or(false);
            if finished {
                state.thinking_finished = true;
                state.display_mode = AssistantDisplayMode::Report;
                complete_writer.write(ThinkingComplete);
                info!("Thinking sequence complete; showing report.");
            }
        }
        AssistantDisplayMode::Report | AssistantDisplayMode::Recap => {}
    }
}

/// Surfaces the one-time completion signal as a workspace status line.
fn announce_thinking_complete(
    mut events: EventReader<ThinkingComplete>,
    registry: Res<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    for _ in events.read() {
        feedback.write(ReviewOperationFeedback {
            message: format!(
                "Analysis complete — {} finding(s) flagged for review",
                registry.issues().len()
            ),
            is_error: false,
        });
    }
}

fn refresh_suggestions(registry: Res<ReviewRegistry>, mut state: ResMut<AssistantState>) {
    if registry.is_changed() || state.suggestions.is_empty() {
        state.suggestions = responses::contextual_suggestions(registry.issues());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::seed;

    #[test]
    fn completion_signal_surfaces_a_feedback_line() {
        let mut app = App::new();
        app.add_event::<ThinkingComplete>()
            .add_event::<ReviewOperationFeedback>()
            .insert_resource(ReviewRegistry::new(
                seed::seed_fields(),
                seed::seed_issues(),
                seed::seed_documents(),
            ))
            .add_systems(Update, announce_thinking_complete);

        app.world_mut().send_event(ThinkingComplete);
        app.update();

        let events = app.world().resource::<Events<ReviewOperationFeedback>>();
        let mut cursor = events.get_cursor();
        let messages: Vec<&ReviewOperationFeedback> = cursor.read(events).collect();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].message.contains("5 finding(s)"));
        assert!(!messages[0].is_error);
    }
}
