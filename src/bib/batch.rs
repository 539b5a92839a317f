use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::bib::advisor::FormatAdvisor;
use crate::bib::crossref::MetadataSource;
use crate::bib::reconcile::{reconcile, Reconciliation, Verdict};
use crate::bib::record::{BibEntry, Bibliography};

/// Per-entry result carried into the report, in processing order.
#[derive(Debug)]
pub struct EntryOutcome {
    pub key: String,
    pub reconciliation: Reconciliation,
    pub advisory: Option<String>,
}

/// Aggregate result of one validation pass. Built incrementally by the
/// validator, immutable afterwards, consumed by the report renderer.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    pub valid: usize,
    pub corrected: usize,
    pub unresolved: usize,
    pub outcomes: Vec<EntryOutcome>,
}

/// Sequential batch validator.
///
/// Processes entries strictly one at a time, sleeping the configured delay
/// before every lookup to respect the metadata API's rate limits. The delay
/// is not skipped after failed lookups.
pub struct Validator<S: MetadataSource> {
    source: S,
    delay: Duration,
    advisor: Option<FormatAdvisor>,
}

impl<S: MetadataSource> Validator<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        Self {
            source,
            delay,
            advisor: None,
        }
    }

    /// Attach the optional format advisor; its commentary lands in the
    /// report and never influences verdicts.
    pub fn with_advisor(mut self, advisor: FormatAdvisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Validate every entry and return the output collection plus the
    /// batch report. The output has exactly as many entries as the input,
    /// in the same order: corrected entries where the verdict was
    /// `Corrected`, originals otherwise.
    pub fn run(&self, bibliography: &Bibliography) -> (Bibliography, BatchReport) {
        let mut output = Bibliography::new();
        let mut report = BatchReport {
            total: bibliography.len(),
            ..Default::default()
        };

        for entry in bibliography.iter() {
            info!("Validating entry: {}", entry.key);

            thread::sleep(self.delay);
            let candidate = self.source.lookup(&search_query(entry));
            let reconciliation = reconcile(entry, candidate.as_ref());

            match reconciliation.verdict {
                Verdict::Valid => {
                    report.valid += 1;
                    output.push(entry.clone());
                    info!("✓ {}: {}", entry.key, reconciliation.summary);
                }
                Verdict::Corrected => {
                    report.corrected += 1;
                    output.push(reconciliation.apply(entry));
                    info!("⚠ {}: {}", entry.key, reconciliation.summary);
                }
                Verdict::Unresolved => {
                    report.unresolved += 1;
                    output.push(entry.clone());
                    warn!("✗ {}: {}", entry.key, reconciliation.summary);
                }
            }

            let advisory = self.advisor.as_ref().and_then(|a| a.advise(entry));

            report.outcomes.push(EntryOutcome {
                key: entry.key.clone(),
                reconciliation,
                advisory,
            });
        }

        (output, report)
    }
}

/// Search key for the metadata lookup: title, author, journal and year
/// joined with single spaces.
fn search_query(entry: &BibEntry) -> String {
    format!(
        "{} {} {} {}",
        entry.value("title"),
        entry.value("author"),
        entry.value("journal"),
        entry.value("year")
    )
}
