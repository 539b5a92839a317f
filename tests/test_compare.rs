use bibcheck::bib::compare::{equivalent_author_lists, fuzzy_match, matches, normalize_authors};

#[test]
fn test_title_fuzzy_match_case_and_punctuation() {
    assert!(matches("title", "Deep Learning for NLP", "Deep learning for nlp"));
    assert!(matches(
        "title",
        "Attention Is All You Need!",
        "attention is all you need"
    ));
}

#[test]
fn test_title_fuzzy_match_rejects_unrelated() {
    assert!(!matches("title", "Deep Learning", "Shallow Parsing"));
}

#[test]
fn test_journal_fuzzy_match() {
    assert!(matches(
        "journal",
        "Journal of Machine Learning Research",
        "journal of machine learning research"
    ));
    assert!(!matches("journal", "Nature", "Physical Review Letters"));
}

#[test]
fn test_year_requires_exact_match() {
    assert!(matches("year", "2020", "2020"));
    // textually similar but numerically different
    assert!(!matches("year", "2020", "2021"));
}

#[test]
fn test_volume_requires_exact_match() {
    assert!(matches("volume", "42", "42"));
    assert!(!matches("volume", "42", "43"));
}

#[test]
fn test_pages_format_differences_are_real() {
    assert!(matches("pages", "123--456", "123--456"));
    assert!(!matches("pages", "123-456", "123--456"));
}

#[test]
fn test_empty_values_produce_no_mismatch() {
    assert!(matches("title", "", "Some Title"));
    assert!(matches("title", "Some Title", ""));
    assert!(matches("pages", "", ""));
}

#[test]
fn test_fuzzy_match_identical_after_normalization() {
    assert!(fuzzy_match("A {Special} Title?", "a special title"));
}

#[test]
fn test_author_equivalence_order_insensitive() {
    assert!(equivalent_author_lists("A and B", "B and A"));
    assert!(equivalent_author_lists(
        "Jane Smith and Bob Brown",
        "Bob Brown and Jane Smith"
    ));
}

#[test]
fn test_author_equivalence_whitespace_insensitive() {
    assert!(equivalent_author_lists("A  and   B", "A and B"));
    assert!(equivalent_author_lists("Jane  Smith and Bob Brown", "Jane Smith and Bob Brown"));
}

#[test]
fn test_author_lists_with_different_members_differ() {
    assert!(!equivalent_author_lists("A and B", "A and C"));
    assert!(!equivalent_author_lists("A", "A and B"));
}

#[test]
fn test_normalize_authors_sorts_and_trims() {
    assert_eq!(
        normalize_authors("  Carol   Williams and Alice Smith "),
        vec!["Alice Smith".to_string(), "Carol Williams".to_string()]
    );
}
