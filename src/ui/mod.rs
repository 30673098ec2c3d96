// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod elements;
pub mod placement;
pub mod systems;

use elements::workspace::{review_workspace_ui, WorkspaceState};
use systems::handle_ui_feedback;

/// Latest transient status line shown in the workspace footer.
#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the assisted review workspace UI.
pub struct WorkspaceUiPlugin;

impl Plugin for WorkspaceUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .init_resource::<WorkspaceState>()
            .add_systems(Startup, elements::workspace::restore_panel_layout)
            .add_systems(Update, handle_ui_feedback)
            .add_systems(EguiContextPass, review_workspace_ui);

        info!("WorkspaceUiPlugin initialized.");
    }
}
