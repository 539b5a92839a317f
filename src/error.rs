use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the validation pipeline. Lookup failures are not part of
/// this taxonomy: the metadata gateway recovers them as "no candidate" so a
/// single bad entry never aborts the batch.
#[derive(Error, Debug)]
pub enum BibCheckError {
    #[error("bibliography file not found: {0:?}")]
    SourceNotFound(PathBuf),

    #[error("failed to parse bibliography: {0}")]
    ParseFailure(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("metadata API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
