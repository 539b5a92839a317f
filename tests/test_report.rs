use std::collections::HashMap;

use bibcheck::bib::report::render_report;
use bibcheck::bib::{BatchReport, EntryOutcome, Reconciliation, Verdict};

fn report_with_outcomes() -> BatchReport {
    let valid = EntryOutcome {
        key: "ok2020".to_string(),
        reconciliation: Reconciliation {
            verdict: Verdict::Valid,
            summary: "all fields confirmed".to_string(),
            corrections: HashMap::new(),
        },
        advisory: None,
    };

    let mut corrections = HashMap::new();
    corrections.insert("year".to_string(), "2019".to_string());
    let corrected = EntryOutcome {
        key: "fixed2021".to_string(),
        reconciliation: Reconciliation {
            verdict: Verdict::Corrected,
            summary: "year: '2021' -> '2019'".to_string(),
            corrections,
        },
        advisory: Some("page range uses a single hyphen".to_string()),
    };

    let unresolved = EntryOutcome {
        key: "lost2022".to_string(),
        reconciliation: Reconciliation {
            verdict: Verdict::Unresolved,
            summary: "no matching external record found".to_string(),
            corrections: HashMap::new(),
        },
        advisory: None,
    };

    BatchReport {
        total: 3,
        valid: 1,
        corrected: 1,
        unresolved: 1,
        outcomes: vec![valid, corrected, unresolved],
    }
}

#[test]
fn test_report_contains_summary_counts() {
    let text = render_report(&report_with_outcomes());
    assert!(text.starts_with("# BibTeX Validation Report"));
    assert!(text.contains("**Generated**: "));
    assert!(text.contains("- Total entries: 3"));
    assert!(text.contains("- Valid: 1"));
    assert!(text.contains("- Corrected: 1"));
    assert!(text.contains("- Unresolved: 1"));
}

#[test]
fn test_report_lists_entries_in_order_with_markers() {
    let text = render_report(&report_with_outcomes());

    let ok = text.find("### ✓ ok2020").expect("valid entry section");
    let fixed = text.find("### ⚠ fixed2021").expect("corrected entry section");
    let lost = text.find("### ✗ lost2022").expect("unresolved entry section");
    assert!(ok < fixed && fixed < lost);

    assert!(text.contains("- Status: year: '2021' -> '2019'"));
    assert!(text.contains("  - year: 2019"));
}

#[test]
fn test_report_includes_advisory_block() {
    let text = render_report(&report_with_outcomes());
    assert!(text.contains("- Format commentary:"));
    assert!(text.contains("> page range uses a single hyphen"));
}
