use std::fs;
use std::path::Path;

use log::info;

use crate::bib::batch::BatchReport;
use crate::bib::reconcile::Verdict;
use crate::error::BibCheckError;

/// Render the batch report as a Markdown document: header and timestamp,
/// summary counts, then one section per entry in processing order.
pub fn render_report(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str("# BibTeX Validation Report\n\n");
    out.push_str(&format!(
        "**Generated**: {}\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("## Summary\n");
    out.push_str(&format!("- Total entries: {}\n", report.total));
    out.push_str(&format!("- Valid: {}\n", report.valid));
    out.push_str(&format!("- Corrected: {}\n", report.corrected));
    out.push_str(&format!("- Unresolved: {}\n\n", report.unresolved));

    out.push_str("## Entries\n");
    for outcome in &report.outcomes {
        let marker = match outcome.reconciliation.verdict {
            Verdict::Valid => "✓",
            Verdict::Corrected => "⚠",
            Verdict::Unresolved => "✗",
        };
        out.push_str(&format!("### {} {}\n", marker, outcome.key));
        out.push_str(&format!("- Status: {}\n", outcome.reconciliation.summary));

        if !outcome.reconciliation.corrections.is_empty() {
            out.push_str("- Corrections:\n");
            // Sort fields for consistent output
            let mut fields: Vec<_> = outcome.reconciliation.corrections.keys().collect();
            fields.sort();
            for field in fields {
                out.push_str(&format!(
                    "  - {}: {}\n",
                    field, outcome.reconciliation.corrections[field]
                ));
            }
        }

        if let Some(advisory) = &outcome.advisory {
            out.push_str("- Format commentary:\n\n");
            out.push_str(&format!("  > {}\n", advisory.replace('\n', "\n  > ")));
        }

        out.push('\n');
    }

    out
}

/// Write the rendered report to disk.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), BibCheckError> {
    fs::write(path, render_report(report))?;
    info!("Validation report written to {:?}", path);
    Ok(())
}
