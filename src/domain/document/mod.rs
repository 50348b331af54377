//! Document domain module.
//!
//! Owner-scoped markdown documents, title derivation, and the error
//! taxonomy shared by the document and export operations.

mod aggregate;
mod errors;
mod title;

pub use aggregate::{Document, MAX_TITLE_LENGTH};
pub use errors::DocumentError;
pub use title::{
    extract_title, sanitize_filename, DEFAULT_FILENAME, DERIVED_TITLE_MAX_CHARS,
    MAX_FILENAME_CHARS, UNTITLED,
};
