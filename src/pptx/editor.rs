//! Persisting text edits for presentations.

use super::slides::slide_parts;
use super::DEFAULT_MAIN_PART;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::xml_edit::{append_child, text_paragraph, Occurrence};
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling path with the extension replaced by `.txt`.
pub fn shadow_text_path(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().with_extension("txt")
}

/// Write `text` to `<base>.txt` next to the presentation.
///
/// The presentation itself is never opened, so it stays byte-identical;
/// an existing shadow file is overwritten.
pub fn write_shadow_text(path: impl AsRef<Path>, text: &str) -> Result<PathBuf> {
    let target = shadow_text_path(path);
    fs::write(&target, text)?;
    tracing::debug!(path = %target.display(), "wrote presentation shadow text");
    Ok(target)
}

/// Append `text` as a new paragraph to the last text body of the last slide.
///
/// The presentation is rewritten in place, mirroring how Word edits are
/// persisted. Fails with [`Error::MissingComponent`] when the presentation
/// has no slides or its last slide has no text body.
pub fn append_paragraph(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let container = OoxmlContainer::open(path)?;

    let presentation = container
        .main_part(DEFAULT_MAIN_PART)?
        .ok_or_else(|| Error::MissingComponent("presentation part".to_string()))?;
    let slide = slide_parts(&container, &presentation)?
        .pop()
        .ok_or_else(|| Error::MissingComponent("presentation slides".to_string()))?;

    let xml = container.read_xml(&slide)?;
    let updated = append_child(&xml, b"txBody", Occurrence::Last, None, |prefix| {
        text_paragraph(prefix, text, false)
    })?
    .ok_or_else(|| Error::MissingComponent(format!("text body in {}", slide)))?;

    let package = container.replace_part(&slide, updated.as_bytes())?;
    drop(container);

    fs::write(path, package)?;
    tracing::debug!(path = %path.display(), slide = %slide, "appended paragraph to presentation");
    Ok(())
}
