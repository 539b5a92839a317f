use bibcheck::bib::Bibliography;
use bibcheck::BibCheckError;
use std::fs;
use std::path::Path;

const SAMPLE_BIB: &str = r#"@article{lecun2015deep,
  title = {Deep learning},
  author = {LeCun, Yann and Bengio, Yoshua and Hinton, Geoffrey},
  journal = {Nature},
  volume = {521},
  pages = {436--444},
  year = {2015}
}

@inproceedings{vaswani2017attention,
  title = "Attention is all you need",
  author = "Vaswani, Ashish and Shazeer, Noam",
  booktitle = "Advances in Neural Information Processing Systems",
  year = "2017"
}

@book{goodfellow2016deep,
  title = {Deep Learning},
  author = {Goodfellow, Ian and Bengio, Yoshua and Courville, Aaron},
  publisher = {MIT Press},
  year = {2016}
}
"#;

#[test]
fn test_parse_preserves_entry_order() {
    let bib = Bibliography::parse(SAMPLE_BIB).unwrap();
    assert_eq!(bib.len(), 3);
    let keys: Vec<&str> = bib.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["lecun2015deep", "vaswani2017attention", "goodfellow2016deep"]
    );
}

#[test]
fn test_parse_entry_fields() {
    let bib = Bibliography::parse(SAMPLE_BIB).unwrap();

    let lecun = bib.get("lecun2015deep").unwrap();
    assert_eq!(lecun.entry_type, "article");
    assert_eq!(lecun.value("journal"), "Nature");
    assert_eq!(lecun.value("pages"), "436--444");
    assert_eq!(lecun.value("year"), "2015");

    // quoted values parse the same as braced ones
    let vaswani = bib.get("vaswani2017attention").unwrap();
    assert_eq!(vaswani.entry_type, "inproceedings");
    assert_eq!(vaswani.value("title"), "Attention is all you need");
}

#[test]
fn test_parse_skips_comment_blocks() {
    let src = "@comment{just a note}\n@article{a2020,\n  title = {T},\n  year = {2020}\n}";
    let bib = Bibliography::parse(src).unwrap();
    assert_eq!(bib.len(), 1);
    assert!(bib.get("a2020").is_some());
}

#[test]
fn test_parse_garbage_is_fatal() {
    let result = Bibliography::parse("this is not bibtex at all");
    assert!(matches!(result, Err(BibCheckError::ParseFailure(_))));
}

#[test]
fn test_load_missing_file() {
    let result = Bibliography::load(Path::new("/nonexistent/references.bib"));
    assert!(matches!(result, Err(BibCheckError::SourceNotFound(_))));
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refs.bib");

    let bib = Bibliography::parse(SAMPLE_BIB).unwrap();
    bib.save(&path).unwrap();

    let reloaded = Bibliography::load(&path).unwrap();
    assert_eq!(reloaded.len(), 3);
    let keys: Vec<&str> = reloaded.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["lecun2015deep", "vaswani2017attention", "goodfellow2016deep"]
    );
    assert_eq!(
        reloaded.get("lecun2015deep").unwrap().value("pages"),
        "436--444"
    );
}

#[test]
fn test_serialized_output_shape() {
    let bib = Bibliography::parse("@article{k1,\n  title = {T},\n  year = {2020}\n}").unwrap();
    let out = bib.to_bibtex();
    assert!(out.starts_with("@article{k1,\n"));
    assert!(out.contains("  title = {T},\n"));
    assert!(out.contains("  year = {2020},\n"));
    assert!(out.trim_end().ends_with('}'));
}

#[test]
fn test_load_propagates_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.bib");
    fs::write(&path, "garbage content, no entries").unwrap();

    let result = Bibliography::load(&path);
    assert!(matches!(result, Err(BibCheckError::ParseFailure(_))));
}
