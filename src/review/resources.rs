// src/review/resources.rs
use bevy::prelude::*;

use super::definitions::{
    CorrectionStatus, Document, Field, FieldValue, ImportStatus, IssueCategory, IssueStatus,
    ReviewIssue,
};

/// Per-category open/total counts for the report view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: IssueCategory,
    pub open: usize,
    pub total: usize,
}

impl CategorySummary {
    /// A category reads as complete once every issue in it has been
    /// addressed. Empty categories are never "complete".
    pub fn is_complete(&self) -> bool {
        self.open == 0 && self.total > 0
    }
}

/// Single writable copy of the cross-referenced review model. All child UI
/// receives read-only views and signals intended mutations via events; only
/// the handlers in `review::systems` call the mutating methods here.
#[derive(Resource, Debug, Default)]
pub struct ReviewRegistry {
    fields: Vec<Field>,
    issues: Vec<ReviewIssue>,
    documents: Vec<Document>,
}

impl ReviewRegistry {
    pub fn new(fields: Vec<Field>, issues: Vec<ReviewIssue>, documents: Vec<Document>) -> Self {
        ReviewRegistry { fields, issues, documents }
    }

    // --- Read-only views ---

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn issues(&self) -> &[ReviewIssue] {
        &self.issues
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get_field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn get_issue(&self, issue_id: &str) -> Option<&ReviewIssue> {
        self.issues.iter().find(|i| i.id == issue_id)
    }

    pub fn get_document(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    /// The field ids an issue highlights, verbatim from the issue. The
    /// orchestrator owns the visual highlight set.
    pub fn affected_fields<'a>(&self, issue: &'a ReviewIssue) -> &'a [String] {
        &issue.affected_fields
    }

    /// Issues grouped per category in the fixed category order, preserving
    /// seed order within each category. No sorting is applied.
    pub fn issues_by_category(&self) -> Vec<(IssueCategory, Vec<&ReviewIssue>)> {
        IssueCategory::ALL
            .iter()
            .map(|cat| {
                let group: Vec<&ReviewIssue> =
                    self.issues.iter().filter(|i| i.category == *cat).collect();
                (*cat, group)
            })
            .collect()
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        IssueCategory::ALL
            .iter()
            .map(|cat| {
                let total = self.issues.iter().filter(|i| i.category == *cat).count();
                let open = self
                    .issues
                    .iter()
                    .filter(|i| i.category == *cat && i.status == IssueStatus::Open)
                    .count();
                CategorySummary { category: *cat, open, total }
            })
            .collect()
    }

    /// Overall progress as a whole percentage. Zero issues means 0%, not a
    /// division error.
    pub fn progress_percent(&self) -> u32 {
        let total = self.issues.len();
        if total == 0 {
            return 0;
        }
        let correct = self
            .issues
            .iter()
            .filter(|i| i.status == IssueStatus::Correct)
            .count();
        (100.0 * correct as f64 / total as f64).round() as u32
    }

    pub fn open_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.status == IssueStatus::Open)
            .count()
    }

    // --- Mutations (called from review::systems only) ---

    /// Replaces the extracted value of the source backed by `document_id` on
    /// the given field, then recomputes the field's aggregate: when every
    /// source on the field parses as a number, `current_value` becomes their
    /// sum and the field is marked corrected. A field with no sources, or a
    /// document id with no matching source, is a silent no-op.
    pub fn edit_source_value(&mut self, field_id: &str, document_id: &str, new_value: &str) {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == field_id) else {
            warn!("edit_source_value: unknown field '{}', ignoring.", field_id);
            return;
        };
        if field.sources.is_empty() {
            return;
        }
        let Some(source) = field
            .sources
            .iter_mut()
            .find(|s| s.document_id == document_id)
        else {
            debug!(
                "edit_source_value: document '{}' not referenced by field '{}', ignoring.",
                document_id, field_id
            );
            return;
        };
        source.extracted_value = new_value.to_string();

        let numeric: Option<Vec<f64>> =
            field.sources.iter().map(|s| s.numeric_value()).collect();
        if let Some(values) = numeric {
            let sum: f64 = values.iter().sum();
            field.current_value = FieldValue::Number(sum);
            field.correction_status = CorrectionStatus::Corrected;
            info!(
                "Recomputed field '{}' from {} source(s): {}",
                field_id,
                field.sources.len(),
                sum
            );
        }
    }

    /// Marks an issue correct. One-way: a correct issue never goes back to
    /// open. The resolution note is stored only when the user supplied one.
    pub fn mark_issue_correct(&mut self, issue_id: &str, note: Option<String>) -> bool {
        let Some(issue) = self.issues.iter_mut().find(|i| i.id == issue_id) else {
            warn!("mark_issue_correct: unknown issue '{}', ignoring.", issue_id);
            return false;
        };
        if issue.status != IssueStatus::Open {
            return false;
        }
        issue.status = IssueStatus::Correct;
        if let Some(note) = note {
            let trimmed = note.trim();
            if !trimmed.is_empty() {
                issue.resolution_note = Some(trimmed.to_string());
            }
        }
        true
    }

    /// Clears the manual-review flag on a field. Idempotent.
    pub fn mark_field_reviewed(&mut self, field_id: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == field_id) {
            field.needs_manual_review = false;
        }
    }

    /// Sets or clears a document's reviewer. Idempotent in both directions.
    pub fn set_document_reviewed(&mut self, document_id: &str, reviewer: Option<String>) {
        if let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) {
            doc.reviewed_by = reviewer;
        }
    }

    /// Begins the import simulation for a `Ready` document.
    pub fn begin_document_import(&mut self, document_id: &str) {
        if let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) {
            if doc.import_status == ImportStatus::Ready {
                doc.import_status = ImportStatus::Importing;
            }
        }
    }

    /// Advances every `Importing` document to `Imported`. The sequence is
    /// one-way; already-imported documents are untouched. Returns the names
    /// of documents that finished this tick.
    pub fn advance_document_imports(&mut self) -> Vec<String> {
        let mut finished = Vec::new();
        for doc in self.documents.iter_mut() {
            if doc.import_status == ImportStatus::Importing {
                doc.import_status = ImportStatus::Imported;
                finished.push(doc.name.clone());
            }
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::definitions::{DocumentType, Severity, SourceReference};

    fn field_with_sources(id: &str, values: &[(&str, &str)]) -> Field {
        let sources = values
            .iter()
            .map(|(doc_id, value)| SourceReference {
                document_id: doc_id.to_string(),
                document_name: format!("Doc {}", doc_id),
                document_type: DocumentType::W2,
                extracted_value: value.to_string(),
                confidence: 95,
                page: 1,
                field_label: None,
            })
            .collect();
        Field {
            id: id.to_string(),
            label: format!("Line {}", id),
            current_value: FieldValue::Number(0.0),
            prior_year_value: None,
            percent_change: None,
            sources,
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        }
    }

    fn issue(id: &str, category: IssueCategory, affected: &[&str]) -> ReviewIssue {
        ReviewIssue {
            id: id.to_string(),
            category,
            severity: Severity::Medium,
            status: IssueStatus::Open,
            title: id.to_string(),
            description: String::new(),
            explanation: String::new(),
            suggested_action: String::new(),
            affected_fields: affected.iter().map(|s| s.to_string()).collect(),
            missing_documents: Vec::new(),
            details: Vec::new(),
            penalty: None,
            resolution_note: None,
        }
    }

    #[test]
    fn source_edit_recomputes_numeric_aggregate() {
        let field = field_with_sources("line-1a", &[("doc-a", "5000"), ("doc-b", "3000")]);
        let mut registry = ReviewRegistry::new(vec![field], Vec::new(), Vec::new());

        registry.edit_source_value("line-1a", "doc-b", "4000");

        let field = registry.get_field("line-1a").unwrap();
        assert_eq!(field.current_value, FieldValue::Number(9000.0));
        assert_eq!(field.correction_status, CorrectionStatus::Corrected);
    }

    #[test]
    fn source_edit_skips_aggregate_when_any_source_is_text() {
        let field = field_with_sources("line-8", &[("doc-a", "4500"), ("doc-b", "See K-1")]);
        let mut registry = ReviewRegistry::new(vec![field], Vec::new(), Vec::new());

        registry.edit_source_value("line-8", "doc-a", "4800");

        let field = registry.get_field("line-8").unwrap();
        // The source itself is updated, but the aggregate is left alone.
        assert_eq!(field.sources[0].extracted_value, "4800");
        assert_eq!(field.current_value, FieldValue::Number(0.0));
        assert_eq!(field.correction_status, CorrectionStatus::Unmodified);
    }

    #[test]
    fn source_edit_with_unknown_document_is_a_noop() {
        let field = field_with_sources("line-1a", &[("doc-a", "5000")]);
        let before = field.clone();
        let mut registry = ReviewRegistry::new(vec![field], Vec::new(), Vec::new());

        registry.edit_source_value("line-1a", "doc-zz", "9999");

        assert_eq!(registry.get_field("line-1a").unwrap(), &before);
    }

    #[test]
    fn source_edit_on_sourceless_field_is_a_noop() {
        let mut field = field_with_sources("line-9", &[]);
        field.current_value = FieldValue::Number(89746.0);
        let before = field.clone();
        let mut registry = ReviewRegistry::new(vec![field], Vec::new(), Vec::new());

        registry.edit_source_value("line-9", "doc-a", "1");

        assert_eq!(registry.get_field("line-9").unwrap(), &before);
    }

    #[test]
    fn progress_is_zero_for_empty_issue_set() {
        let registry = ReviewRegistry::default();
        assert_eq!(registry.progress_percent(), 0);
    }

    #[test]
    fn progress_rounds_to_whole_percent() {
        let issues: Vec<ReviewIssue> = (0..7)
            .map(|i| issue(&format!("iss-{}", i), IssueCategory::Compliance, &[]))
            .collect();
        let mut registry = ReviewRegistry::new(Vec::new(), issues, Vec::new());
        registry.mark_issue_correct("iss-0", None);
        registry.mark_issue_correct("iss-1", None);
        // 2 of 7 -> 28.57 -> 29
        assert_eq!(registry.progress_percent(), 29);
    }

    #[test]
    fn correct_status_is_terminal() {
        let issues = vec![issue("iss-a", IssueCategory::YoyAnalysis, &["line-1a"])];
        let mut registry = ReviewRegistry::new(Vec::new(), issues, Vec::new());

        assert!(registry.mark_issue_correct("iss-a", Some("verified".into())));
        // A second transition attempt reports false and changes nothing.
        assert!(!registry.mark_issue_correct("iss-a", Some("again".into())));

        let issue = registry.get_issue("iss-a").unwrap();
        assert_eq!(issue.status, IssueStatus::Correct);
        assert_eq!(issue.resolution_note.as_deref(), Some("verified"));
    }

    #[test]
    fn resolution_note_is_optional() {
        let issues = vec![issue("iss-a", IssueCategory::ScanQuality, &[])];
        let mut registry = ReviewRegistry::new(Vec::new(), issues, Vec::new());
        registry.mark_issue_correct("iss-a", None);
        assert_eq!(registry.get_issue("iss-a").unwrap().resolution_note, None);
    }

    #[test]
    fn affected_fields_pass_through_verbatim() {
        let issues = vec![
            issue("iss-yoy", IssueCategory::YoyAnalysis, &["line-1a"]),
            issue("iss-scan", IssueCategory::ScanQuality, &["line-25a"]),
        ];
        let registry = ReviewRegistry::new(Vec::new(), issues, Vec::new());

        let yoy = registry.get_issue("iss-yoy").unwrap();
        assert_eq!(registry.affected_fields(yoy), &["line-1a".to_string()]);
        let scan = registry.get_issue("iss-scan").unwrap();
        assert_eq!(registry.affected_fields(scan), &["line-25a".to_string()]);
    }

    #[test]
    fn category_summary_tracks_open_counts_in_seed_order() {
        let issues = vec![
            issue("iss-yoy", IssueCategory::YoyAnalysis, &["line-1a"]),
            issue("iss-scan", IssueCategory::ScanQuality, &["line-25a"]),
            issue("iss-yoy-2", IssueCategory::YoyAnalysis, &["line-2b"]),
        ];
        let mut registry = ReviewRegistry::new(Vec::new(), issues, Vec::new());
        registry.mark_issue_correct("iss-scan", None);

        let summaries = registry.category_summaries();
        assert_eq!(summaries[0].category, IssueCategory::YoyAnalysis);
        assert_eq!((summaries[0].open, summaries[0].total), (2, 2));
        assert!(summaries[1].is_complete());
        // Empty category is not complete.
        assert!(!summaries[2].is_complete());

        let grouped = registry.issues_by_category();
        let yoy_ids: Vec<&str> = grouped[0].1.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(yoy_ids, vec!["iss-yoy", "iss-yoy-2"]);
    }

    #[test]
    fn document_import_advances_one_way() {
        let doc = Document {
            id: "doc-k1".into(),
            name: "Schedule K-1".into(),
            doc_type: DocumentType::K1,
            pages: 4,
            ocr_confidence: 88,
            import_status: ImportStatus::Ready,
            reviewed_by: None,
        };
        let mut registry = ReviewRegistry::new(Vec::new(), Vec::new(), vec![doc]);

        registry.begin_document_import("doc-k1");
        assert_eq!(
            registry.get_document("doc-k1").unwrap().import_status,
            ImportStatus::Importing
        );
        let finished = registry.advance_document_imports();
        assert_eq!(finished, vec!["Schedule K-1".to_string()]);
        // Further begin calls no longer apply.
        registry.begin_document_import("doc-k1");
        assert_eq!(
            registry.get_document("doc-k1").unwrap().import_status,
            ImportStatus::Imported
        );
    }
}
