//! DOCX (Word) document support.
//!
//! Reading flattens the main document body to its inner text; writing
//! appends paragraphs to the body and saves the package in place.

mod editor;
mod text;

pub use editor::append_paragraph;
pub use text::{body_text, extract_text};

/// Conventional location of the main document part.
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";
