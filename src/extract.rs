//! Content extraction with failures folded into the result.
//!
//! Extraction never fails a request: a corrupt or unreadable document is
//! reported through [`Extraction::Failed`], whose message is shown in place
//! of the document body.

use crate::container::OoxmlContainer;
use crate::detect::DocumentKind;
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// Outcome of reading a stored document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "content", rename_all = "lowercase")]
pub enum Extraction {
    /// The extracted plain text.
    Text(String),
    /// A human-readable description of why extraction failed.
    Failed(String),
}

impl Extraction {
    /// The string displayed as the document body, whichever variant this is.
    pub fn content(&self) -> &str {
        match self {
            Extraction::Text(text) | Extraction::Failed(text) => text,
        }
    }

    /// Consume the extraction and return its display string.
    pub fn into_content(self) -> String {
        match self {
            Extraction::Text(text) | Extraction::Failed(text) => text,
        }
    }

    /// Whether the text was read successfully.
    pub fn is_text(&self) -> bool {
        matches!(self, Extraction::Text(_))
    }
}

/// Extract the text of the document stored at `path`.
///
/// # Example
///
/// ```no_run
/// use officedit::{extract, DocumentKind};
///
/// let extraction = extract("wwwroot/uploads/report.docx", DocumentKind::Word);
/// println!("{}", extraction.content());
/// ```
pub fn extract(path: impl AsRef<Path>, kind: DocumentKind) -> Extraction {
    let path = path.as_ref();
    match read_text(path, kind) {
        Ok(text) => Extraction::Text(text),
        Err(err) => {
            tracing::error!(path = %path.display(), kind = %kind, error = %err, "failed to extract document content");
            let message = match kind {
                DocumentKind::Word => format!("Error reading Word document content: {}", err),
                DocumentKind::PowerPoint => {
                    format!("Error reading PowerPoint presentation content: {}", err)
                }
            };
            Extraction::Failed(message)
        }
    }
}

pub(crate) fn read_text(path: &Path, kind: DocumentKind) -> Result<String> {
    let container = OoxmlContainer::open(path)?;
    match kind {
        #[cfg(feature = "docx")]
        DocumentKind::Word => crate::docx::extract_text(&container),
        #[cfg(feature = "pptx")]
        DocumentKind::PowerPoint => crate::pptx::extract_text(&container),
        #[allow(unreachable_patterns)]
        _ => Err(Error::UnsupportedFormat(kind.to_string())),
    }
}
