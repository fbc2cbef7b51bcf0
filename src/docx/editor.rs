//! Appending text to a stored Word document.

use super::DEFAULT_MAIN_PART;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::xml_edit::{append_child, text_paragraph, Occurrence};
use std::fs;
use std::path::Path;

/// Append `text` as a new single-run paragraph at the end of the body.
///
/// Existing content is never touched, so repeated calls accumulate
/// paragraphs. The paragraph is placed in front of the body-level section
/// properties, which must stay the last child of the body.
///
/// The file is rewritten in place. Concurrent calls on the same file are not
/// coordinated; the last writer wins.
pub fn append_paragraph(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let container = OoxmlContainer::open(path)?;

    let part = container
        .main_part(DEFAULT_MAIN_PART)?
        .ok_or_else(|| Error::MissingComponent("Word main document part".to_string()))?;
    let xml = container.read_xml(&part)?;

    let updated = append_child(&xml, b"body", Occurrence::First, Some(b"sectPr"), |prefix| {
        text_paragraph(prefix, text, true)
    })?
    .ok_or_else(|| Error::MissingComponent("Word document body".to_string()))?;

    let package = container.replace_part(&part, updated.as_bytes())?;
    drop(container);

    fs::write(path, package)?;
    tracing::debug!(path = %path.display(), part = %part, "appended paragraph to Word document");
    Ok(())
}
