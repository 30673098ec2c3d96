// src/review/systems.rs
//
// The only code path that mutates `ReviewRegistry`. Every UI element signals
// its intent via the request events in `review::events` and these handlers
// apply them, keeping the cross-reference invariants in one place.
use bevy::prelude::*;

use super::definitions::ImportStatus;
use super::events::{
    BeginDocumentImportRequest, EditSourceValueRequest, ExportSnapshotRequest, IssueActionEvent,
    MarkFieldReviewedRequest, MarkIssueCorrectRequest, ReviewOperationFeedback,
    SetDocumentReviewedRequest,
};
use super::export;
use super::resources::ReviewRegistry;

pub fn handle_edit_source_value(
    mut events: EventReader<EditSourceValueRequest>,
    mut registry: ResMut<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    for ev in events.read() {
        registry.edit_source_value(&ev.field_id, &ev.document_id, &ev.new_value);
        if let Some(field) = registry.get_field(&ev.field_id) {
            feedback.write(ReviewOperationFeedback {
                message: format!("{} updated to {}", field.label, field.current_value),
                is_error: false,
            });
        }
    }
}

pub fn handle_mark_issue_correct(
    mut events: EventReader<MarkIssueCorrectRequest>,
    mut registry: ResMut<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    for ev in events.read() {
        if registry.mark_issue_correct(&ev.issue_id, ev.note.clone()) {
            let progress = registry.progress_percent();
            feedback.write(ReviewOperationFeedback {
                message: format!("Issue marked correct — review {}% complete", progress),
                is_error: false,
            });
        }
    }
}

pub fn handle_mark_field_reviewed(
    mut events: EventReader<MarkFieldReviewedRequest>,
    mut registry: ResMut<ReviewRegistry>,
) {
    for ev in events.read() {
        registry.mark_field_reviewed(&ev.field_id);
    }
}

pub fn handle_set_document_reviewed(
    mut events: EventReader<SetDocumentReviewedRequest>,
    mut registry: ResMut<ReviewRegistry>,
) {
    for ev in events.read() {
        registry.set_document_reviewed(&ev.document_id, ev.reviewer.clone());
    }
}

pub fn handle_begin_document_import(
    mut events: EventReader<BeginDocumentImportRequest>,
    mut registry: ResMut<ReviewRegistry>,
) {
    for ev in events.read() {
        registry.begin_document_import(&ev.document_id);
        info!("Import started for document '{}'.", ev.document_id);
    }
}

/// Drives the one-way import simulation: any document left in `Importing`
/// finishes on the next timer tick.
#[derive(Resource)]
pub struct DocumentImportTimer {
    pub timer: Timer,
}

impl Default for DocumentImportTimer {
    fn default() -> Self {
        DocumentImportTimer {
            timer: Timer::from_seconds(2.0, TimerMode::Repeating),
        }
    }
}

pub fn tick_document_imports(
    time: Res<Time>,
    mut import_timer: ResMut<DocumentImportTimer>,
    mut registry: ResMut<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    let importing = registry
        .documents()
        .iter()
        .any(|d| d.import_status == ImportStatus::Importing);
    if !importing {
        import_timer.timer.reset();
        return;
    }
    if import_timer.timer.tick(time.delta()).just_finished() {
        for name in registry.advance_document_imports() {
            feedback.write(ReviewOperationFeedback {
                message: format!("Imported {}", name),
                is_error: false,
            });
        }
    }
}

pub fn handle_export_snapshot(
    mut events: EventReader<ExportSnapshotRequest>,
    registry: Res<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    for _ in events.read() {
        match export::write_snapshot(&registry) {
            Ok(path) => {
                info!("Exported review snapshot to {:?}.", path);
                feedback.write(ReviewOperationFeedback {
                    message: format!("Snapshot exported to {}", path.display()),
                    is_error: false,
                });
            }
            Err(e) => {
                warn!("Snapshot export failed: {}", e);
                feedback.write(ReviewOperationFeedback {
                    message: format!("Snapshot export failed: {}", e),
                    is_error: true,
                });
            }
        }
    }
}

/// Host-shell side of the named issue actions. The demo has no real
/// navigation target, so actions are logged and surfaced as feedback.
pub fn handle_issue_actions(
    mut events: EventReader<IssueActionEvent>,
    registry: Res<ReviewRegistry>,
    mut feedback: EventWriter<ReviewOperationFeedback>,
) {
    for ev in events.read() {
        let title = registry
            .get_issue(&ev.issue_id)
            .map(|i| i.title.clone())
            .unwrap_or_else(|| ev.issue_id.clone());
        info!("Issue action '{}' dispatched for '{}'.", ev.action.as_str(), title);
        feedback.write(ReviewOperationFeedback {
            message: format!("{}: {}", ev.action.as_str(), title),
            is_error: false,
        });
    }
}
