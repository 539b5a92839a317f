pub mod advisor;
pub mod batch;
pub mod compare;
pub mod crossref;
pub mod parser;
pub mod reconcile;
pub mod record;
pub mod report;

pub use advisor::FormatAdvisor;
pub use batch::{BatchReport, EntryOutcome, Validator};
pub use crossref::{CandidateRecord, CrossrefClient, LookupConfig, MetadataSource};
pub use reconcile::{reconcile, Reconciliation, Verdict};
pub use record::{BibEntry, BibEntryBuilder, Bibliography};

use once_cell::sync::Lazy;
use regex::Regex;

// Commonly used regex patterns compiled once
pub(crate) static BIBTEX_ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@([a-zA-Z]+)\s*\{\s*([^,\s]+)\s*,").expect("Invalid BibTeX entry regex pattern")
});
pub(crate) static BIBTEX_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Values are either brace-delimited (one nesting level supported) or quoted.
    Regex::new(r#"([a-zA-Z][a-zA-Z_-]*)\s*=\s*(?:\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}|"([^"]*)")"#)
        .expect("Invalid BibTeX field regex pattern")
});
