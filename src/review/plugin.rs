// src/review/plugin.rs
use bevy::prelude::*;

use super::events::{
    BeginDocumentImportRequest, EditSourceValueRequest, ExportSnapshotRequest, IssueActionEvent,
    MarkFieldReviewedRequest, MarkIssueCorrectRequest, ReviewOperationFeedback,
    SetDocumentReviewedRequest,
};
use super::resources::ReviewRegistry;
use super::seed;
use super::systems;
use super::systems::DocumentImportTimer;

// System sets keep registry mutation after UI input and before anything
// reading the mutated state in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewSystemSet {
    ApplyChanges,
    Simulation,
}

/// Plugin owning the cross-referenced review model and its mutation path.
pub struct ReviewPlugin;

impl Plugin for ReviewPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                ReviewSystemSet::ApplyChanges,
                ReviewSystemSet::Simulation.after(ReviewSystemSet::ApplyChanges),
            ),
        );

        app.init_resource::<DocumentImportTimer>();

        app.add_event::<EditSourceValueRequest>()
            .add_event::<MarkIssueCorrectRequest>()
            .add_event::<MarkFieldReviewedRequest>()
            .add_event::<SetDocumentReviewedRequest>()
            .add_event::<BeginDocumentImportRequest>()
            .add_event::<IssueActionEvent>()
            .add_event::<ExportSnapshotRequest>()
            .add_event::<ReviewOperationFeedback>();

        app.add_systems(Startup, seed_registry);

        app.add_systems(
            Update,
            (
                systems::handle_edit_source_value,
                systems::handle_mark_issue_correct,
                systems::handle_mark_field_reviewed,
                systems::handle_set_document_reviewed,
                systems::handle_begin_document_import,
                systems::handle_export_snapshot,
                systems::handle_issue_actions,
            )
                .chain()
                .in_set(ReviewSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            systems::tick_document_imports.in_set(ReviewSystemSet::Simulation),
        );

        info!("ReviewPlugin initialized.");
    }
}

fn seed_registry(mut commands: Commands) {
    let fields = seed::seed_fields();
    let issues = seed::seed_issues();
    let documents = seed::seed_documents();
    info!(
        "Seeding review registry: {} fields, {} issues, {} documents.",
        fields.len(),
        issues.len(),
        documents.len()
    );
    commands.insert_resource(ReviewRegistry::new(fields, issues, documents));
}
