// src/review/seed.rs
//
// Static seed data for the demo return. The workspace receives these flat
// lists at mount; nothing here is re-validated on ingest.
use super::definitions::{
    CorrectionStatus, DetailRow, Document, DocumentType, Field, FieldValue, ImportStatus,
    IssueCategory, IssueStatus, PenaltyEstimate, ReviewIssue, Severity, SourceReference,
};

fn source(
    document_id: &str,
    document_name: &str,
    document_type: DocumentType,
    extracted_value: &str,
    confidence: u8,
    page: u32,
    field_label: &str,
) -> SourceReference {
    SourceReference {
        document_id: document_id.to_string(),
        document_name: document_name.to_string(),
        document_type,
        extracted_value: extracted_value.to_string(),
        confidence,
        page,
        field_label: Some(field_label.to_string()),
    }
}

pub fn seed_fields() -> Vec<Field> {
    vec![
        Field {
            id: "line-1a".into(),
            label: "1a — Wages, salaries, tips (W-2 box 1)".into(),
            current_value: FieldValue::Number(83_550.0),
            prior_year_value: Some(112_400.0),
            percent_change: Some(-25.7),
            sources: vec![
                source(
                    "doc-w2-acme",
                    "W-2 — Acme Corporation",
                    DocumentType::W2,
                    "72,350.00",
                    98,
                    1,
                    "Box 1 — Wages",
                ),
                source(
                    "doc-w2-northwind",
                    "W-2 — Northwind Traders",
                    DocumentType::W2,
                    "11,200.00",
                    61,
                    1,
                    "Box 1 — Wages",
                ),
            ],
            component_fields: Vec::new(),
            needs_manual_review: true,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-2b".into(),
            label: "2b — Taxable interest".into(),
            current_value: FieldValue::Number(412.0),
            prior_year_value: Some(380.0),
            percent_change: Some(8.4),
            sources: vec![source(
                "doc-1099-int",
                "1099-INT — First National Bank",
                DocumentType::Ten99Int,
                "412.00",
                97,
                1,
                "Box 1 — Interest income",
            )],
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-3b".into(),
            label: "3b — Ordinary dividends".into(),
            current_value: FieldValue::Number(1_284.0),
            prior_year_value: Some(1_150.0),
            percent_change: Some(11.7),
            sources: vec![source(
                "doc-1099-div",
                "1099-DIV — Meridian Brokerage",
                DocumentType::Ten99Div,
                "1,284.00",
                94,
                1,
                "Box 1a — Total ordinary dividends",
            )],
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-8".into(),
            label: "8 — Other income from Schedule 1".into(),
            current_value: FieldValue::Number(4_500.0),
            prior_year_value: Some(6_200.0),
            percent_change: Some(-27.4),
            sources: vec![source(
                "doc-k1-bluestone",
                "Schedule K-1 — Bluestone Partners LP",
                DocumentType::K1,
                "4,500.00",
                88,
                2,
                "Part III, box 1 — Ordinary income",
            )],
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-9".into(),
            label: "9 — Total income".into(),
            current_value: FieldValue::Number(89_746.0),
            prior_year_value: Some(120_130.0),
            percent_change: Some(-25.3),
            sources: Vec::new(),
            component_fields: vec![
                "line-1a".into(),
                "line-2b".into(),
                "line-3b".into(),
                "line-8".into(),
            ],
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-12".into(),
            label: "12 — Standard deduction".into(),
            current_value: FieldValue::Number(14_600.0),
            prior_year_value: Some(13_850.0),
            percent_change: Some(5.4),
            sources: Vec::new(),
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-22".into(),
            label: "22 — Total tax".into(),
            current_value: FieldValue::Number(10_030.0),
            prior_year_value: Some(15_890.0),
            percent_change: Some(-36.9),
            sources: Vec::new(),
            component_fields: Vec::new(),
            needs_manual_review: false,
            correction_status: CorrectionStatus::Unmodified,
        },
        Field {
            id: "line-25a".into(),
            label: "25a — Federal income tax withheld (W-2)".into(),
            current_value: FieldValue::Number(8_920.0),
            prior_year_value: Some(16_120.0),
            percent_change: Some(-44.7),
            sources: vec![
                source(
                    "doc-w2-acme",
                    "W-2 — Acme Corporation",
                    DocumentType::W2,
                    "7,580.00",
                    98,
                    1,
                    "Box 2 — Federal income tax withheld",
                ),
                source(
                    "doc-w2-northwind",
                    "W-2 — Northwind Traders",
                    DocumentType::W2,
                    "1,340.00",
                    61,
                    1,
                    "Box 2 — Federal income tax withheld",
                ),
            ],
            component_fields: Vec::new(),
            needs_manual_review: true,
            correction_status: CorrectionStatus::Unmodified,
        },
    ]
}

pub fn seed_issues() -> Vec<ReviewIssue> {
    vec![
        ReviewIssue {
            id: "iss-wages-drop".into(),
            category: IssueCategory::YoyAnalysis,
            severity: Severity::High,
            status: IssueStatus::Open,
            title: "Wages dropped 25.7% year over year".into(),
            description: "Reported wages of $83,550 are well below last year's $112,400.".into(),
            explanation: "A drop this large usually reflects a job change, a missing W-2, or a \
                          wage entry keyed from a low-confidence scan. Two W-2s are on file; \
                          confirm no employer is missing before filing."
                .into(),
            suggested_action: "Confirm both W-2 Box 1 amounts against the paper copies and ask \
                               the client whether a third employer existed this year."
                .into(),
            affected_fields: vec!["line-1a".into(), "line-9".into()],
            missing_documents: Vec::new(),
            details: vec![
                DetailRow { label: "Prior year".into(), value: "$112,400".into() },
                DetailRow { label: "Current year".into(), value: "$83,550".into() },
                DetailRow { label: "Change".into(), value: "-25.7%".into() },
            ],
            penalty: None,
            resolution_note: None,
        },
        ReviewIssue {
            id: "iss-interest-up".into(),
            category: IssueCategory::YoyAnalysis,
            severity: Severity::Low,
            status: IssueStatus::Open,
            title: "Taxable interest up 8.4%".into(),
            description: "Interest income rose from $380 to $412.".into(),
            explanation: "Small increases are expected with current rates. Flagged only \
                          because the account also reported dividends without a 1099-B."
                .into(),
            suggested_action: "No correction expected; verify the 1099-INT box 1 amount.".into(),
            affected_fields: vec!["line-2b".into()],
            missing_documents: Vec::new(),
            details: Vec::new(),
            penalty: None,
            resolution_note: None,
        },
        ReviewIssue {
            id: "iss-scan-northwind".into(),
            category: IssueCategory::ScanQuality,
            severity: Severity::Medium,
            status: IssueStatus::Open,
            title: "Low OCR confidence on Northwind W-2".into(),
            description: "The Northwind Traders W-2 scanned at 61% confidence.".into(),
            explanation: "Both Box 1 and Box 2 on this document feed totals on the return. A \
                          misread digit here propagates into wages and withholding."
                .into(),
            suggested_action: "Open the scan and re-key Box 1 and Box 2 from the image.".into(),
            affected_fields: vec!["line-1a".into(), "line-25a".into()],
            missing_documents: Vec::new(),
            details: vec![
                DetailRow { label: "Document".into(), value: "W-2 — Northwind Traders".into() },
                DetailRow { label: "OCR confidence".into(), value: "61%".into() },
                DetailRow { label: "Pages".into(), value: "1".into() },
            ],
            penalty: None,
            resolution_note: None,
        },
        ReviewIssue {
            id: "iss-underpayment".into(),
            category: IssueCategory::Compliance,
            severity: Severity::High,
            status: IssueStatus::Open,
            title: "Possible underpayment penalty".into(),
            description: "Withholding of $8,920 is below the $9,027 safe-harbor threshold."
                .into(),
            explanation: "Total tax is $10,030 and withholding covers only 89% of it. Unless \
                          estimated payments close the gap, a Form 2210 penalty applies."
                .into(),
            suggested_action: "Review estimated payments, or plan quarterly payments of $278 \
                               for the coming year."
                .into(),
            affected_fields: vec!["line-25a".into(), "line-22".into()],
            missing_documents: Vec::new(),
            details: Vec::new(),
            penalty: Some(PenaltyEstimate {
                amount: 89.0,
                calculation: "Underpayment of $1,110 × 8% annual rate, prorated across four \
                              quarters ≈ $89"
                    .into(),
                safe_harbor_threshold: Some(9_027.0),
                current_withholding: Some(8_920.0),
                suggested_quarterly_payment: Some(278.0),
            }),
            resolution_note: None,
        },
        ReviewIssue {
            id: "iss-1099b-missing".into(),
            category: IssueCategory::CreditsDeductions,
            severity: Severity::Medium,
            status: IssueStatus::Open,
            title: "Brokerage reported dividends but no 1099-B on file".into(),
            description: "Meridian Brokerage issued a 1099-DIV; sales activity may be missing."
                .into(),
            explanation: "Dividend-paying accounts frequently also have sale proceeds. Filing \
                          without the 1099-B risks a CP2000 notice for unreported gains."
                .into(),
            suggested_action: "Request the consolidated 1099 package from Meridian Brokerage."
                .into(),
            affected_fields: vec!["line-3b".into()],
            missing_documents: vec!["Form 1099-B — Meridian Brokerage".into()],
            details: Vec::new(),
            penalty: None,
            resolution_note: None,
        },
    ]
}

pub fn seed_documents() -> Vec<Document> {
    vec![
        Document {
            id: "doc-w2-acme".into(),
            name: "W-2 — Acme Corporation".into(),
            doc_type: DocumentType::W2,
            pages: 2,
            ocr_confidence: 98,
            import_status: ImportStatus::Imported,
            reviewed_by: Some("M. Alvarez".into()),
        },
        Document {
            id: "doc-w2-northwind".into(),
            name: "W-2 — Northwind Traders".into(),
            doc_type: DocumentType::W2,
            pages: 1,
            ocr_confidence: 61,
            import_status: ImportStatus::Imported,
            reviewed_by: None,
        },
        Document {
            id: "doc-1099-int".into(),
            name: "1099-INT — First National Bank".into(),
            doc_type: DocumentType::Ten99Int,
            pages: 1,
            ocr_confidence: 97,
            import_status: ImportStatus::Imported,
            reviewed_by: Some("M. Alvarez".into()),
        },
        Document {
            id: "doc-1099-div".into(),
            name: "1099-DIV — Meridian Brokerage".into(),
            doc_type: DocumentType::Ten99Div,
            pages: 3,
            ocr_confidence: 94,
            import_status: ImportStatus::Imported,
            reviewed_by: None,
        },
        Document {
            id: "doc-k1-bluestone".into(),
            name: "Schedule K-1 — Bluestone Partners LP".into(),
            doc_type: DocumentType::K1,
            pages: 4,
            ocr_confidence: 88,
            import_status: ImportStatus::Importing,
            reviewed_by: None,
        },
        Document {
            id: "doc-prior-return".into(),
            name: "Prior-year return (2023)".into(),
            doc_type: DocumentType::Other,
            pages: 24,
            ocr_confidence: 99,
            import_status: ImportStatus::Ready,
            reviewed_by: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_field_references_resolve() {
        let fields = seed_fields();
        for issue in seed_issues() {
            for field_id in &issue.affected_fields {
                assert!(
                    fields.iter().any(|f| &f.id == field_id),
                    "issue '{}' references unknown field '{}'",
                    issue.id,
                    field_id
                );
            }
        }
    }

    #[test]
    fn sourced_numeric_fields_sum_to_current_value() {
        for field in seed_fields() {
            let numeric: Option<Vec<f64>> =
                field.sources.iter().map(|s| s.numeric_value()).collect();
            if field.sources.is_empty() {
                continue;
            }
            if let (Some(values), Some(current)) = (numeric, field.current_value.as_number()) {
                let sum: f64 = values.iter().sum();
                assert!(
                    (sum - current).abs() < 0.005,
                    "field '{}': sources sum {} != current {}",
                    field.id,
                    sum,
                    current
                );
            }
        }
    }

    #[test]
    fn source_documents_exist_in_document_list() {
        let documents = seed_documents();
        for field in seed_fields() {
            for src in &field.sources {
                assert!(
                    documents.iter().any(|d| d.id == src.document_id),
                    "field '{}' sources unknown document '{}'",
                    field.id,
                    src.document_id
                );
            }
        }
    }
}
