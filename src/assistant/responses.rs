// src/assistant/responses.rs
//
// Deterministic response selection for the chat loop: an ordered list of
// (predicate, response) rules evaluated against the lowercased input, first
// match wins, with an explicit default. No language model is involved.
use crate::review::definitions::{IssueCategory, IssueStatus, ReviewIssue};

pub struct ResponseRule {
    pub name: &'static str,
    matches: fn(&str) -> bool,
    pub response: &'static str,
}

impl ResponseRule {
    pub fn matches(&self, lowercased: &str) -> bool {
        (self.matches)(lowercased)
    }
}

fn any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| input.contains(n))
}

const WAGES_RESPONSE: &str = "Wages on line 1a total $83,550 across two W-2s: $72,350 from \
Acme Corporation and $11,200 from Northwind Traders. Last year the client reported $112,400, \
so this is a 25.7% drop.\n\nThe most common causes are a mid-year job change or a W-2 that \
was never uploaded. I'd confirm with the client that only two employers issued W-2s this year \
before treating the drop as real.";

const SCAN_RESPONSE: &str = "One document is below the review threshold: the Northwind \
Traders W-2 scanned at 61% OCR confidence. Every other document is at 88% or higher.\n\nBoth \
Box 1 (wages) and Box 2 (withholding) from that W-2 feed return totals, so I'd re-key those \
two boxes from the image before signing off.";

const COMPARE_WITHHOLDING_RESPONSE: &str = "Withholding is $8,920 this year against $16,120 \
last year — a 44.7% drop, steeper than the 25.7% drop in wages.\n\nWhen withholding falls \
faster than income it usually means a W-4 change or an employer that under-withheld. That \
gap is what creates the underpayment exposure on this return.";

const WITHHOLDING_RESPONSE: &str = "Federal withholding on line 25a is $8,920, drawn from \
W-2 Box 2 amounts of $7,580 (Acme) and $1,340 (Northwind).\n\nThat covers about 89% of the \
$10,030 total tax, which is below the 90% safe-harbor floor — see the compliance issue for \
the penalty math.";

const MISSING_DOCS_RESPONSE: &str = "One document looks missing: Meridian Brokerage issued a \
1099-DIV, but no 1099-B is on file. Accounts that pay dividends usually also report sale \
proceeds.\n\nI'd request the consolidated 1099 package from Meridian before filing; a missing \
1099-B is a common trigger for CP2000 notices.";

const PRIORITY_RESPONSE: &str = "I'd review in this order:\n\n1. The Northwind W-2 scan \
(61% confidence) — it feeds both wages and withholding, so an OCR error there touches \
everything else.\n\n2. The 25.7% wage drop — confirm no W-2 is missing.\n\n3. The \
underpayment exposure — decide whether estimated payments close the gap.";

const RISK_RESPONSE: &str = "The biggest risk is the underpayment penalty: withholding of \
$8,920 against $10,030 of total tax leaves a $1,110 gap, and the safe harbor isn't met.\n\n\
The wage drop is the biggest accuracy risk — if a third W-2 exists, both income and \
withholding are understated.";

const PENALTY_RESPONSE: &str = "Estimated underpayment penalty: about $89.\n\nThe math: \
total tax is $10,030, so the 90% safe harbor is $9,027. Withholding of $8,920 leaves an \
underpayment of $1,110, charged at the 8% federal short-term rate prorated across four \
quarters.\n\nQuarterly estimated payments of $278 next year would avoid a repeat.";

const BREAKDOWN_RESPONSE: &str = "Line-by-line, the return breaks down as:\n\nIncome — \
wages $83,550, taxable interest $412, ordinary dividends $1,284, Schedule 1 income $4,500, \
for total income of $89,746.\n\nTax — standard deduction $14,600, total tax $10,030, \
federal withholding $8,920.";

const DEFAULT_RESPONSE: &str = "I can answer questions about this return's figures, the \
flagged issues, and the source documents behind each line.\n\nTry asking about the wage \
drop, scan quality, withholding, missing documents, or what to review first.";

/// Ordered decision table. The compare-withholding rule sits ahead of the
/// plain withholding rule so the broader keyword does not shadow it.
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        name: "wages-yoy",
        matches: |s| any(s, &["wage", "income drop", "yoy"]),
        response: WAGES_RESPONSE,
    },
    ResponseRule {
        name: "scan-quality",
        matches: |s| any(s, &["scan", "confidence", "ocr"]),
        response: SCAN_RESPONSE,
    },
    ResponseRule {
        name: "compare-withholding",
        matches: |s| s.contains("compare") && s.contains("withhold"),
        response: COMPARE_WITHHOLDING_RESPONSE,
    },
    ResponseRule {
        name: "withholding",
        matches: |s| s.contains("withhold"),
        response: WITHHOLDING_RESPONSE,
    },
    ResponseRule {
        name: "missing-documents",
        matches: |s| any(s, &["missing", "document"]),
        response: MISSING_DOCS_RESPONSE,
    },
    ResponseRule {
        name: "priorities",
        matches: |s| any(s, &["priorit", "review next", "first"]),
        response: PRIORITY_RESPONSE,
    },
    ResponseRule {
        name: "risk",
        matches: |s| any(s, &["risk", "biggest"]),
        response: RISK_RESPONSE,
    },
    ResponseRule {
        name: "penalty",
        matches: |s| any(s, &["penalty", "underpayment"]),
        response: PENALTY_RESPONSE,
    },
    ResponseRule {
        name: "breakdown",
        matches: |s| any(s, &["breakdown", "calculation"]),
        response: BREAKDOWN_RESPONSE,
    },
];

/// First matching rule wins; unmatched input gets the fixed default.
pub fn select_response(input: &str) -> &'static str {
    let lowercased = input.to_lowercase();
    for rule in RESPONSE_RULES {
        if rule.matches(&lowercased) {
            return rule.response;
        }
    }
    DEFAULT_RESPONSE
}

pub const MAX_SUGGESTIONS: usize = 6;

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "What should I review first?",
    "Give me a breakdown of this return",
    "Compare withholding to last year",
    "What's the biggest risk here?",
];

/// Ranked follow-up prompts derived from which categories still have open
/// issues and whether any open issue is missing documents. Falls back to a
/// fixed default list when no issues are supplied.
pub fn contextual_suggestions(issues: &[ReviewIssue]) -> Vec<String> {
    if issues.is_empty() {
        return DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }

    let open = |cat: IssueCategory| {
        issues
            .iter()
            .any(|i| i.category == cat && i.status == IssueStatus::Open)
    };
    let missing_docs = issues
        .iter()
        .any(|i| i.status == IssueStatus::Open && !i.missing_documents.is_empty());

    let mut suggestions: Vec<String> = Vec::new();
    if missing_docs {
        suggestions.push("What documents are still missing?".into());
    }
    if open(IssueCategory::YoyAnalysis) {
        suggestions.push("Why did wages drop compared to last year?".into());
    }
    if open(IssueCategory::ScanQuality) {
        suggestions.push("Which scans have low confidence?".into());
    }
    if open(IssueCategory::Compliance) {
        suggestions.push("How was the underpayment penalty calculated?".into());
    }
    if open(IssueCategory::CreditsDeductions) {
        suggestions.push("Any credits or deductions to double-check?".into());
    }
    suggestions.push("What should I review first?".into());
    suggestions.push("What's the biggest risk here?".into());

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::seed::seed_issues;

    #[test]
    fn first_matching_rule_wins() {
        // "wage" appears before "withhold" in the table.
        assert_eq!(select_response("Why did wages and withholding drop?"), WAGES_RESPONSE);
        assert_eq!(select_response("what about the OCR confidence?"), SCAN_RESPONSE);
    }

    #[test]
    fn compare_rule_is_not_shadowed_by_withholding() {
        assert_eq!(
            select_response("Compare withholding to last year"),
            COMPARE_WITHHOLDING_RESPONSE
        );
        assert_eq!(select_response("how much withholding?"), WITHHOLDING_RESPONSE);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(select_response("PENALTY?"), PENALTY_RESPONSE);
    }

    #[test]
    fn unmatched_input_gets_default() {
        assert_eq!(select_response("hello there"), DEFAULT_RESPONSE);
    }

    #[test]
    fn responses_split_into_multiple_paragraphs() {
        for rule in RESPONSE_RULES {
            let blocks = crate::review::definitions::split_paragraphs(rule.response);
            assert!(blocks.len() >= 2, "rule '{}' should be multi-paragraph", rule.name);
        }
    }

    #[test]
    fn suggestions_fall_back_to_defaults_without_issues() {
        let suggestions = contextual_suggestions(&[]);
        assert_eq!(suggestions.len(), DEFAULT_SUGGESTIONS.len());
        assert_eq!(suggestions[0], "What should I review first?");
    }

    #[test]
    fn suggestions_follow_open_issues_and_cap_at_six() {
        let issues = seed_issues();
        let suggestions = contextual_suggestions(&issues);
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        // Seed data has an open issue with missing documents; that prompt ranks first.
        assert_eq!(suggestions[0], "What documents are still missing?");
        assert!(suggestions.contains(&"Why did wages drop compared to last year?".to_string()));
    }

    #[test]
    fn resolved_categories_stop_suggesting() {
        let mut issues = seed_issues();
        for issue in issues.iter_mut() {
            if issue.category == IssueCategory::ScanQuality {
                issue.status = IssueStatus::Correct;
            }
        }
        let suggestions = contextual_suggestions(&issues);
        assert!(!suggestions.contains(&"Which scans have low confidence?".to_string()));
    }
}
