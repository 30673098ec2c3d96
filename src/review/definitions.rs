// src/review/definitions.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The displayed value of a form line: either a number that participates in
/// aggregation, or preformatted text (e.g. "See Schedule B").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", format_amount(*n)),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Dollar formatting with thousands separators. Whole dollars are shown
/// without cents; fractional amounts keep two decimals.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let abs = value.abs();
    let mut whole = abs.trunc() as u64;
    let mut cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, cents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrectionStatus {
    #[default]
    Unmodified,
    Corrected,
}

/// A pointer from a form line to the document extraction that backs it.
/// Owned by exactly one `Field`; documents themselves live in the registry's
/// document list and may be referenced by many sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub document_id: String,
    pub document_name: String,
    pub document_type: DocumentType,
    /// Raw extracted value as read by OCR. Numeric for box amounts, but may
    /// be arbitrary text for narrative extractions.
    pub extracted_value: String,
    /// OCR confidence, 0-100.
    pub confidence: u8,
    pub page: u32,
    pub field_label: Option<String>,
}

impl SourceReference {
    pub fn numeric_value(&self) -> Option<f64> {
        self.extracted_value.trim().replace(',', "").parse::<f64>().ok()
    }
}

/// One reportable line of the tax form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub current_value: FieldValue,
    pub prior_year_value: Option<f64>,
    pub percent_change: Option<f64>,
    #[serde(default)]
    pub sources: Vec<SourceReference>,
    /// Ids of component fields when this line is a computed total.
    #[serde(default)]
    pub component_fields: Vec<String>,
    #[serde(default)]
    pub needs_manual_review: bool,
    #[serde(default)]
    pub correction_status: CorrectionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    YoyAnalysis,
    ScanQuality,
    Compliance,
    CreditsDeductions,
}

impl IssueCategory {
    /// Seed/report ordering. Categories render in this order everywhere.
    pub const ALL: [IssueCategory; 4] = [
        IssueCategory::YoyAnalysis,
        IssueCategory::ScanQuality,
        IssueCategory::Compliance,
        IssueCategory::CreditsDeductions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::YoyAnalysis => "Year-over-Year Analysis",
            IssueCategory::ScanQuality => "Scan Quality",
            IssueCategory::Compliance => "Compliance",
            IssueCategory::CreditsDeductions => "Credits & Deductions",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IssueStatus {
    #[default]
    Open,
    Correct,
    Resolved,
}

/// A key/value row shown in an issue's expanded detail section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

/// Estimated penalty attached to a compliance issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyEstimate {
    pub amount: f64,
    pub calculation: String,
    pub safe_harbor_threshold: Option<f64>,
    pub current_withholding: Option<f64>,
    pub suggested_quarterly_payment: Option<f64>,
}

/// Named actions an issue card can dispatch to the host shell. The host maps
/// these to navigation; the workspace only knows the action names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueAction {
    ViewSources,
    ViewDocument,
    ViewCalculation,
}

impl IssueAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueAction::ViewSources => "view-sources",
            IssueAction::ViewDocument => "view-document",
            IssueAction::ViewCalculation => "view-calculation",
        }
    }
}

/// A concern flagged by the assistant against one or more form lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub id: String,
    pub category: IssueCategory,
    pub severity: Severity,
    #[serde(default)]
    pub status: IssueStatus,
    pub title: String,
    pub description: String,
    pub explanation: String,
    pub suggested_action: String,
    /// Ordered, deduplicated ids of fields this issue concerns. Entries must
    /// reference existing fields in the registry.
    pub affected_fields: Vec<String>,
    #[serde(default)]
    pub missing_documents: Vec<String>,
    #[serde(default)]
    pub details: Vec<DetailRow>,
    pub penalty: Option<PenaltyEstimate>,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    W2,
    Ten99Int,
    Ten99Div,
    Ten99Misc,
    K1,
    Other,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::W2 => "W-2",
            DocumentType::Ten99Int => "1099-INT",
            DocumentType::Ten99Div => "1099-DIV",
            DocumentType::Ten99Misc => "1099-MISC",
            DocumentType::K1 => "K-1",
            DocumentType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    Ready,
    Importing,
    Imported,
}

impl ImportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ImportStatus::Ready => "Ready",
            ImportStatus::Importing => "Importing…",
            ImportStatus::Imported => "Imported",
        }
    }
}

/// An uploaded return document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub doc_type: DocumentType,
    pub pages: u32,
    /// Whole-document OCR confidence, 0-100.
    pub ocr_confidence: u8,
    pub import_status: ImportStatus,
    pub reviewed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn in the assistant chat sub-thread. Immutable once created; the
/// thread is an append-only list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    /// Paragraph blocks, split on blank lines. Empty for user turns.
    #[serde(default)]
    pub blocks: Vec<String>,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

impl AgentMessage {
    pub fn user(text: impl Into<String>) -> Self {
        AgentMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::User,
            text: text.into(),
            blocks: Vec::new(),
            sent_at: chrono::Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        let text = text.into();
        let blocks = split_paragraphs(&text);
        AgentMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            text,
            blocks,
            sent_at: chrono::Utc::now(),
        }
    }
}

/// Splits response text on blank-line boundaries into paragraph blocks.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_formatting_groups_thousands() {
        assert_eq!(format_amount(83550.0), "$83,550");
        assert_eq!(format_amount(412.0), "$412");
        assert_eq!(format_amount(1284.5), "$1,284.50");
        assert_eq!(format_amount(-1110.0), "-$1,110");
        assert_eq!(format_amount(0.0), "$0");
    }

    #[test]
    fn source_numeric_parse_tolerates_separators() {
        let src = SourceReference {
            document_id: "doc".into(),
            document_name: "W-2".into(),
            document_type: DocumentType::W2,
            extracted_value: "72,350".into(),
            confidence: 98,
            page: 1,
            field_label: None,
        };
        assert_eq!(src.numeric_value(), Some(72350.0));
    }

    #[test]
    fn agent_messages_serialize_with_timestamps() {
        let message = AgentMessage::assistant("First.\n\nSecond.");
        let json = serde_json::to_string(&message).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["sent_at"].is_string());
        assert_eq!(value["role"], "Assistant");

        let back: AgentMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn paragraph_split_drops_blank_runs() {
        let blocks = split_paragraphs("First.\n\nSecond line\nwraps.\n\n\nThird.");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], "Second line\nwraps.");
    }
}
