// src/review/events.rs
use bevy::prelude::Event;

use super::definitions::IssueAction;

/// Sent when the user edits a source document value inside a field popover.
/// Handled by `review::systems::handle_edit_source_value`.
#[derive(Event, Debug, Clone)]
pub struct EditSourceValueRequest {
    pub field_id: String,
    pub document_id: String,
    pub new_value: String,
}

/// Sent when the user marks an issue as correct, optionally with a note.
#[derive(Event, Debug, Clone)]
pub struct MarkIssueCorrectRequest {
    pub issue_id: String,
    pub note: Option<String>,
}

/// Sent when the user acknowledges a field flagged for manual review.
#[derive(Event, Debug, Clone)]
pub struct MarkFieldReviewedRequest {
    pub field_id: String,
}

/// Sent when the user toggles a document's reviewed state.
#[derive(Event, Debug, Clone)]
pub struct SetDocumentReviewedRequest {
    pub document_id: String,
    pub reviewer: Option<String>,
}

/// Sent when the user starts the import simulation for a ready document.
#[derive(Event, Debug, Clone)]
pub struct BeginDocumentImportRequest {
    pub document_id: String,
}

/// Sent when the user exports the current review state as a JSON snapshot.
#[derive(Event, Debug, Clone)]
pub struct ExportSnapshotRequest;

/// An issue-card action dispatched to the host shell by name. The workspace
/// does not interpret the target; the host maps it to navigation.
#[derive(Event, Debug, Clone)]
pub struct IssueActionEvent {
    pub issue_id: String,
    pub action: IssueAction,
}

/// Transient status line for the workspace footer.
#[derive(Event, Debug, Clone)]
pub struct ReviewOperationFeedback {
    pub message: String,
    pub is_error: bool,
}
