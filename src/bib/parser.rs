use std::fs;
use std::path::Path;

use log::info;

use crate::bib::record::{BibEntry, BibEntryBuilder, Bibliography};
use crate::bib::{BIBTEX_ENTRY_REGEX, BIBTEX_FIELD_REGEX};
use crate::error::BibCheckError;

impl Bibliography {
    /// Parse BibTeX source into an ordered bibliography.
    ///
    /// Unparseable input is fatal for the whole run, so malformed syntax
    /// surfaces as `ParseFailure` rather than a silently empty collection.
    pub fn parse(content: &str) -> Result<Self, BibCheckError> {
        let mut bibliography = Self::new();

        // Locate entry headers, then slice the source between consecutive
        // headers so each entry's fields are scanned in isolation.
        let headers: Vec<_> = BIBTEX_ENTRY_REGEX.captures_iter(content).collect();

        for (i, caps) in headers.iter().enumerate() {
            let entry_type = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
            let key = caps.get(2).map_or("", |m| m.as_str()).trim();

            // @comment / @string / @preamble carry no citation data
            if matches!(entry_type.as_str(), "comment" | "string" | "preamble") {
                continue;
            }
            if key.is_empty() {
                continue;
            }

            let start = caps.get(0).map_or(0, |m| m.end());
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(content.len(), |m| m.start());
            let body = &content[start..end];

            let mut builder = BibEntryBuilder::new(key, entry_type);
            for field_caps in BIBTEX_FIELD_REGEX.captures_iter(body) {
                let name = field_caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
                let value = field_caps
                    .get(2)
                    .or_else(|| field_caps.get(3))
                    .map_or("", |m| m.as_str());
                builder = builder.field(name, normalize_field_value(value));
            }
            bibliography.push(builder.build());
        }

        if bibliography.is_empty() && !content.trim().is_empty() {
            return Err(BibCheckError::ParseFailure(
                "no BibTeX entries found in input".to_string(),
            ));
        }

        Ok(bibliography)
    }

    /// Read and parse a bibliography file.
    pub fn load(path: &Path) -> Result<Self, BibCheckError> {
        if !path.exists() {
            return Err(BibCheckError::SourceNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let bibliography = Self::parse(&content)?;
        info!(
            "Loaded {} entries from {:?}",
            bibliography.len(),
            path
        );
        Ok(bibliography)
    }

    /// Serialize the bibliography back to BibTeX, entries in input order.
    pub fn to_bibtex(&self) -> String {
        let mut output = String::new();

        for entry in self.iter() {
            output.push_str(&format!("@{}{{{},\n", entry.entry_type, entry.key));

            // Sort fields for consistent output
            let mut fields: Vec<_> = entry.fields.keys().collect();
            fields.sort();

            for field in fields {
                if let Some(value) = entry.fields.get(field) {
                    output.push_str(&format!("  {} = {{{}}},\n", field, value));
                }
            }

            output.push_str("}\n\n");
        }

        output
    }

    /// Write the serialized bibliography to disk. Single write attempt, no
    /// partial-file guarantee.
    pub fn save(&self, path: &Path) -> Result<(), BibCheckError> {
        fs::write(path, self.to_bibtex())?;
        info!("Wrote {} entries to {:?}", self.len(), path);
        Ok(())
    }
}

/// Collapse line breaks and their surrounding indentation inside a field
/// value; multiline values are common in hand-written .bib files.
fn normalize_field_value(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
