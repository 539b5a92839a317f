pub mod bib;
pub mod error;

pub use error::BibCheckError;
