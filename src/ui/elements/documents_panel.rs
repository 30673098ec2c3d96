// src/ui/elements/documents_panel.rs
//
// Bottom tray listing the uploaded return documents with import status and
// the reviewed toggle. State changes leave as request events.
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::review::definitions::ImportStatus;
use crate::review::events::{BeginDocumentImportRequest, SetDocumentReviewedRequest};
use crate::review::resources::ReviewRegistry;

const REVIEWER: &str = "Preparer";

pub fn show_documents_panel(
    ctx: &egui::Context,
    registry: &ReviewRegistry,
    reviewed_writer: &mut EventWriter<SetDocumentReviewedRequest>,
    import_writer: &mut EventWriter<BeginDocumentImportRequest>,
) {
    egui::TopBottomPanel::bottom("documents_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.strong(format!("Documents ({})", registry.documents().len()));
            egui::Grid::new("documents_grid")
                .num_columns(6)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for doc in registry.documents() {
                        ui.label(&doc.name);
                        ui.weak(doc.doc_type.label());
                        ui.weak(format!("{} page(s)", doc.pages));
                        ui.weak(format!("{}% OCR", doc.ocr_confidence));
                        match doc.import_status {
                            ImportStatus::Ready => {
                                if ui.small_button("Import").clicked() {
                                    import_writer.write(BeginDocumentImportRequest {
                                        document_id: doc.id.clone(),
                                    });
                                }
                            }
                            ImportStatus::Importing => {
                                ui.horizontal(|ui| {
                                    ui.spinner();
                                    ui.weak(ImportStatus::Importing.label());
                                });
                            }
                            ImportStatus::Imported => {
                                ui.weak(ImportStatus::Imported.label());
                            }
                        }
                        let mut reviewed = doc.reviewed_by.is_some();
                        if ui.checkbox(&mut reviewed, "Reviewed").changed() {
                            reviewed_writer.write(SetDocumentReviewedRequest {
                                document_id: doc.id.clone(),
                                reviewer: reviewed.then(|| REVIEWER.to_string()),
                            });
                        }
                        ui.end_row();
                    }
                });
            ui.add_space(4.0);
        });
}
