use std::collections::HashMap;

use crate::bib::compare::{equivalent_author_lists, matches};
use crate::bib::crossref::CandidateRecord;
use crate::bib::record::BibEntry;

/// Three-way outcome of reconciling one entry against its candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every comparable field agreed.
    Valid,
    /// At least one field disagreed; corrections carry the candidate values.
    Corrected,
    /// No candidate was available; the original entry is kept untouched.
    Unresolved,
}

/// Result of reconciling one entry: the verdict, a human-readable summary of
/// what changed and why, and the field-level corrections (empty unless
/// `Corrected`).
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub verdict: Verdict,
    pub summary: String,
    pub corrections: HashMap<String, String>,
}

impl Reconciliation {
    fn unresolved(summary: &str) -> Self {
        Self {
            verdict: Verdict::Unresolved,
            summary: summary.to_string(),
            corrections: HashMap::new(),
        }
    }

    /// Overlay the corrections on a copy of the entry. The input is never
    /// mutated; `Valid` and `Unresolved` reconciliations return an identical
    /// copy.
    pub fn apply(&self, entry: &BibEntry) -> BibEntry {
        let mut corrected = entry.clone();
        for (field, value) in &self.corrections {
            corrected.set(field, value.clone());
        }
        corrected
    }
}

/// Compare a local entry with the external candidate, field by field.
///
/// A field participates only when both sides carry a non-empty value; the
/// sole exception is DOI, which is filled in when the local entry lacks one.
/// An existing local DOI is never overwritten, even when the candidate's
/// DOI differs.
pub fn reconcile(entry: &BibEntry, candidate: Option<&CandidateRecord>) -> Reconciliation {
    let candidate = match candidate {
        Some(c) => c,
        None => return Reconciliation::unresolved("no matching external record found"),
    };

    let mut corrections = HashMap::new();
    let mut notes = Vec::new();

    let mut check = |field: &str, local: &str, found: Option<&String>| {
        if let Some(found) = found {
            if !matches(field, local, found) {
                corrections.insert(field.to_string(), found.clone());
                notes.push(format!("{}: '{}' -> '{}'", field, local, found));
            }
        }
    };

    check("title", entry.value("title"), candidate.title.as_ref());
    check("journal", entry.value("journal"), candidate.journal.as_ref());
    check("year", entry.value("year"), candidate.year.as_ref());
    check("volume", entry.value("volume"), candidate.volume.as_ref());
    check("pages", entry.value("pages"), candidate.pages.as_ref());

    // Author lists get their own equivalence test: order and spacing
    // differences are not discrepancies.
    let local_authors = entry.value("author");
    if let Some(expected) = candidate.author_list() {
        if !local_authors.is_empty() && !equivalent_author_lists(local_authors, &expected) {
            notes.push("author list updated".to_string());
            corrections.insert("author".to_string(), expected);
        }
    }

    if entry.value("doi").is_empty() {
        if let Some(doi) = &candidate.doi {
            corrections.insert("doi".to_string(), doi.clone());
            notes.push(format!("added doi: {}", doi));
        }
    }

    if corrections.is_empty() {
        Reconciliation {
            verdict: Verdict::Valid,
            summary: "all fields confirmed".to_string(),
            corrections,
        }
    } else {
        Reconciliation {
            verdict: Verdict::Corrected,
            summary: notes.join("; "),
            corrections,
        }
    }
}
