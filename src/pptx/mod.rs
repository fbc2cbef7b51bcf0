//! PPTX (PowerPoint) presentation support.
//!
//! This module reads slide text in presentation order and provides the two
//! ways a text edit can be persisted: a sibling `.txt` shadow file, or a new
//! paragraph written into the presentation itself.

mod editor;
mod slides;

pub use editor::{append_paragraph, shadow_text_path, write_shadow_text};
pub use slides::{extract_text, slide_parts, slide_texts, EMPTY_PRESENTATION};

/// Conventional location of the presentation part.
pub const DEFAULT_MAIN_PART: &str = "ppt/presentation.xml";
