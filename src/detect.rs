//! Document kind detection by file extension.
//!
//! Uploads are classified purely by their extension; the bytes are never
//! sniffed. A legacy binary `.doc` or `.ppt` is therefore accepted here and
//! only fails later, when the OOXML reader cannot open it.

use std::path::Path;

/// Extensions accepted for upload, lower-case with the leading dot.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".doc", ".docx", ".ppt", ".pptx"];

const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_PPT: &str = "application/vnd.ms-powerpoint";
const MIME_PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Which family of Office document a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Word document (.doc, .docx)
    Word,
    /// PowerPoint presentation (.ppt, .pptx)
    PowerPoint,
}

impl DocumentKind {
    /// Classify an extension such as `".DOCX"` or `"pptx"`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "doc" | "docx" => Some(DocumentKind::Word),
            "ppt" | "pptx" => Some(DocumentKind::PowerPoint),
            _ => None,
        }
    }

    /// Classify a file by the extension of its path.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        Self::from_extension(&extension_of(path)?)
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Word => "Word document",
            DocumentKind::PowerPoint => "PowerPoint presentation",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lower-cased extension of `path` including the leading dot, e.g. `".docx"`.
///
/// A name that is only an extension, such as `.docx`, has no stem and
/// therefore no extension.
pub fn extension_of(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Whether a file name carries one of the [`ALLOWED_EXTENSIONS`].
pub fn is_allowed(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type served for a stored file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some(".doc") => MIME_DOC,
        Some(".docx") => MIME_DOCX,
        Some(".ppt") => MIME_PPT,
        Some(".pptx") => MIME_PPTX,
        _ => MIME_OCTET_STREAM,
    }
}
