//! # officedit
//!
//! Upload, read, edit and download Word and PowerPoint documents.
//!
//! The crate stages uploaded Office files on disk, extracts their plain text
//! for an editor, writes text edits back and serves the stored bytes again.
//! Everything is synchronous and stateless; the filesystem is the only
//! store.
//!
//! ## Quick Start
//!
//! ```no_run
//! use officedit::{DocumentService, ServiceOptions, UpdateRequest, UploadOutcome, UploadedFile};
//!
//! let service = DocumentService::new("wwwroot", ServiceOptions::default());
//!
//! let bytes = std::fs::read("report.docx")?;
//! if let UploadOutcome::Accepted(doc) = service.upload(UploadedFile::new("report.docx", bytes)) {
//!     println!("{}", doc.content);
//!
//!     let response = service.update(&UpdateRequest {
//!         file_path: doc.file_path,
//!         content: "Reviewed.".to_string(),
//!     });
//!     assert!(response.success);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `docx` (default): Word document support
//! - `pptx` (default): PowerPoint presentation support

pub mod container;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod service;
pub mod staging;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "pptx")]
pub mod pptx;

mod xml_edit;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::{content_type_for, is_allowed, DocumentKind, ALLOWED_EXTENSIONS};
pub use error::{Error, Result};
pub use extract::{extract, Extraction};
pub use model::{
    DownloadOutcome, DownloadedFile, StoredDocument, UpdateRequest, UpdateResponse,
    UploadOutcome, UploadedFile,
};
pub use options::{DownloadName, PresentationUpdate, ServiceOptions, StagingLayout};
pub use service::DocumentService;
pub use staging::UploadStore;

use std::path::Path;

/// Extract plain text from a Word or PowerPoint file, classified by its
/// extension.
///
/// Unlike [`extract`], failures are returned as errors instead of being
/// folded into the text.
///
/// # Example
///
/// ```no_run
/// let text = officedit::extract_text("slides.pptx")?;
/// println!("{}", text);
/// # Ok::<(), officedit::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
    extract::read_text(path, kind)
}
