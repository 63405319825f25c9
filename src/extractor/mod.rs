//! Deterministic HTML to plain-text extraction.
//!
//! Regex passes over the document, not a DOM parse. Malformed markup
//! degrades to best-effort output but never panics and never leaks
//! script or style bodies into the text. Pure functions of their input:
//! no network, no state.

pub mod cleaner;
pub mod entities;
pub mod metadata;

pub use metadata::{NO_DESCRIPTION, UNTITLED};

/// Cleaned text plus the metadata extracted alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub description: String,
    pub text: String,
}

/// Run the full extraction over a raw HTML document. Calling this twice
/// on the same input yields byte-identical output.
pub fn extract(html: &str) -> ExtractedPage {
    ExtractedPage {
        title: metadata::extract_title(html),
        description: metadata::extract_description(html),
        text: cleaner::clean(html),
    }
}
