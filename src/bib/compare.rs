//! Field-level matching rules.
//!
//! Free-text fields (title, journal) tolerate case, punctuation and spacing
//! differences up to a similarity threshold; numeric-ish fields (year,
//! volume) and page ranges must agree exactly. An empty value on either side
//! means there is nothing to compare, which is never a mismatch.

/// Acceptance threshold for fuzzy text comparison. Tuned, not derived.
pub const FUZZY_THRESHOLD: f64 = 0.80;

/// Lowercase, drop everything that is not alphanumeric or whitespace, and
/// collapse whitespace runs to single spaces.
fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Similarity-ratio comparison of two free-text values after normalization.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    strsim::normalized_levenshtein(&normalize_text(a), &normalize_text(b)) >= FUZZY_THRESHOLD
}

/// Decide whether a local and a candidate value agree for the given field.
///
/// Pages are deliberately not normalized: a hyphenation or range-format
/// difference is a real discrepancy worth correcting.
pub fn matches(field: &str, local: &str, candidate: &str) -> bool {
    if local.is_empty() || candidate.is_empty() {
        return true;
    }
    match field {
        "title" | "journal" => fuzzy_match(local, candidate),
        _ => local == candidate,
    }
}

/// Canonicalize a BibTeX author list into a sorted vector of names.
///
/// Splits on the literal `" and "` separator, trims each name and collapses
/// internal whitespace, then sorts so author order cannot cause a false
/// mismatch.
pub fn normalize_authors(authors: &str) -> Vec<String> {
    let mut names: Vec<String> = authors
        .split(" and ")
        .map(|name| name.split_whitespace().collect::<Vec<&str>>().join(" "))
        .collect();
    names.sort();
    names
}

/// True iff both strings describe the same multiset of canonicalized names.
pub fn equivalent_author_lists(a: &str, b: &str) -> bool {
    normalize_authors(a) == normalize_authors(b)
}
