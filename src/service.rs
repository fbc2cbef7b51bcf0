//! The document round-trip service: upload, update and download.
//!
//! [`DocumentService`] holds no per-request state. Each call re-derives
//! everything from the staged file, so one instance can be shared across
//! threads. Updates to the same file are not serialised; concurrent edits
//! race on the filesystem and the last write wins.

use crate::detect::{content_type_for, extension_of, is_allowed, DocumentKind};
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::model::{
    DownloadOutcome, DownloadedFile, StoredDocument, UpdateRequest, UpdateResponse,
    UploadOutcome, UploadedFile,
};
use crate::options::{PresentationUpdate, ServiceOptions};
use crate::staging::{file_name_of, UploadStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Shown when no file was selected.
pub const MSG_SELECT_FILE: &str = "Please select a file";
/// Shown when the extension is not accepted.
pub const MSG_INVALID_TYPE: &str =
    "Invalid file type. Only .doc, .docx, .pptx, .ppt files are allowed.";
/// Message of a successful upload.
pub const MSG_PROCESSED: &str = "Document processed successfully";
/// Generic failure of an upload or update.
pub const MSG_FAILED: &str = "An error occurred while updating the document.";
/// Update target does not exist.
pub const MSG_FILE_NOT_FOUND: &str = "File not found.";
/// Message of a successful update.
pub const MSG_UPDATED: &str = "Document updated successfully!";

/// Stateless handler for the upload, update and download operations.
#[derive(Debug, Clone)]
pub struct DocumentService {
    store: UploadStore,
    options: ServiceOptions,
}

impl DocumentService {
    /// Create a service staging files under `web_root/uploads`.
    pub fn new(web_root: impl Into<PathBuf>, options: ServiceOptions) -> Self {
        Self {
            store: UploadStore::new(web_root, options.layout),
            options,
        }
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Validate, stage and extract an uploaded document.
    ///
    /// Validation problems and staging failures are reported as
    /// [`UploadOutcome::Rejected`]; nothing is written for a rejected file.
    /// Extraction problems do not reject the upload, they become the
    /// document's content.
    pub fn upload(&self, file: UploadedFile) -> UploadOutcome {
        let Some(file_name) = file_name_of(&file.file_name) else {
            tracing::warn!("upload rejected: no file selected");
            return UploadOutcome::Rejected(MSG_SELECT_FILE.to_string());
        };

        let (Some(extension), Some(kind)) = (
            extension_of(file_name).filter(|_| is_allowed(file_name)),
            DocumentKind::from_path(file_name),
        ) else {
            tracing::warn!(file_name = %file_name, "upload rejected: invalid file type");
            return UploadOutcome::Rejected(MSG_INVALID_TYPE.to_string());
        };

        let path = match self.store.stage(file_name, &file.bytes) {
            Ok(path) => path,
            Err(err) => {
                tracing::error!(file_name = %file_name, error = %err, "failed to stage upload");
                return UploadOutcome::Rejected(MSG_FAILED.to_string());
            }
        };

        let extraction = extract(&path, kind);
        tracing::info!(
            file_name = %file_name,
            kind = %kind,
            path = %path.display(),
            extracted = extraction.is_text(),
            "document uploaded"
        );

        UploadOutcome::Accepted(StoredDocument {
            file_name: file_name.to_string(),
            file_type: extension,
            content: extraction.into_content(),
            file_path: self.store.relative_to_web_root(&path),
            is_success: true,
            message: MSG_PROCESSED.to_string(),
        })
    }

    /// Persist an edit made in the editor.
    ///
    /// Word documents get the text appended as a new paragraph. Presentations
    /// are handled according to [`ServiceOptions::presentation_update`]. Any
    /// other existing file is left alone and reported as updated.
    pub fn update(&self, request: &UpdateRequest) -> UpdateResponse {
        let path = match self.store.resolve_relative(&request.file_path) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(file_path = %request.file_path, error = %err, "update rejected");
                return UpdateResponse::failed(MSG_FILE_NOT_FOUND);
            }
        };

        if !path.is_file() {
            return UpdateResponse::failed(MSG_FILE_NOT_FOUND);
        }

        match self.apply_update(&path, &request.content) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "document updated");
                UpdateResponse::ok(MSG_UPDATED)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "error updating document");
                UpdateResponse::failed(MSG_FAILED)
            }
        }
    }

    fn apply_update(&self, path: &Path, content: &str) -> Result<()> {
        match DocumentKind::from_path(path) {
            #[cfg(feature = "docx")]
            Some(DocumentKind::Word) => crate::docx::append_paragraph(path, content),
            #[cfg(feature = "pptx")]
            Some(DocumentKind::PowerPoint) => match self.options.presentation_update {
                PresentationUpdate::ShadowText => {
                    crate::pptx::write_shadow_text(path, content).map(|_| ())
                }
                PresentationUpdate::InPlace => crate::pptx::append_paragraph(path, content),
            },
            #[allow(unreachable_patterns)]
            Some(kind) => Err(Error::UnsupportedFormat(kind.to_string())),
            None => Ok(()),
        }
    }

    /// Look up a stored file by its name under the uploads root.
    ///
    /// Unknown names, directories and names that try to leave the uploads
    /// root are all [`DownloadOutcome::NotFound`]. Read failures on an
    /// existing file are returned as errors.
    pub fn download(&self, file_name: &str) -> Result<DownloadOutcome> {
        let path = match self.store.resolve_download(file_name) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(file_name = %file_name, error = %err, "download rejected");
                return Ok(DownloadOutcome::NotFound);
            }
        };

        if !path.is_file() {
            return Ok(DownloadOutcome::NotFound);
        }

        let bytes = fs::read(&path)?;
        Ok(DownloadOutcome::Found(DownloadedFile {
            bytes,
            content_type: content_type_for(file_name),
            download_name: self.options.download_name.apply(file_name).to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DownloadName, StagingLayout};
    use tempfile::TempDir;

    fn new_service(options: ServiceOptions) -> (TempDir, DocumentService) {
        let dir = TempDir::new().unwrap();
        let service = DocumentService::new(dir.path(), options);
        (dir, service)
    }

    #[test]
    fn test_rejects_disallowed_extensions() {
        let (dir, service) = new_service(ServiceOptions::default());
        for name in ["report.pdf", "notes.txt", "noextension", ".docx"] {
            let outcome = service.upload(UploadedFile::new(name, b"data".to_vec()));
            assert_eq!(outcome, UploadOutcome::Rejected(MSG_INVALID_TYPE.to_string()));
        }
        assert!(!dir.path().join("uploads").exists());
    }

    #[test]
    fn test_rejects_missing_file_name() {
        let (_dir, service) = new_service(ServiceOptions::default());
        let outcome = service.upload(UploadedFile::new("", Vec::new()));
        assert_eq!(outcome, UploadOutcome::Rejected(MSG_SELECT_FILE.to_string()));
    }

    #[test]
    fn test_corrupt_upload_is_accepted_with_error_content() {
        let (dir, service) = new_service(ServiceOptions::default());
        let outcome = service.upload(UploadedFile::new("Legacy.DOC", b"not a zip".to_vec()));

        let UploadOutcome::Accepted(doc) = outcome else {
            panic!("corrupt documents are still accepted");
        };
        assert_eq!(doc.file_type, ".doc");
        assert_eq!(doc.file_path, "uploads/Legacy.DOC");
        assert!(doc.content.starts_with("Error reading Word document content: "));
        assert!(doc.is_success);
        assert_eq!(
            fs::read(dir.path().join("uploads/Legacy.DOC")).unwrap(),
            b"not a zip"
        );
    }

    #[test]
    fn test_update_missing_file() {
        let (_dir, service) = new_service(ServiceOptions::default());
        let response = service.update(&UpdateRequest {
            file_path: "uploads/nothing.docx".to_string(),
            content: "x".to_string(),
        });
        assert_eq!(response, UpdateResponse::failed(MSG_FILE_NOT_FOUND));
    }

    #[test]
    fn test_update_outside_web_root() {
        let (_dir, service) = new_service(ServiceOptions::default());
        let response = service.update(&UpdateRequest {
            file_path: "../../etc/hosts".to_string(),
            content: "x".to_string(),
        });
        assert_eq!(response, UpdateResponse::failed(MSG_FILE_NOT_FOUND));
    }

    #[test]
    fn test_update_corrupt_word_file_fails() {
        let (dir, service) = new_service(ServiceOptions::default());
        fs::create_dir_all(dir.path().join("uploads")).unwrap();
        fs::write(dir.path().join("uploads/bad.docx"), b"garbage").unwrap();

        let response = service.update(&UpdateRequest {
            file_path: "uploads/bad.docx".to_string(),
            content: "x".to_string(),
        });
        assert_eq!(response, UpdateResponse::failed(MSG_FAILED));
        assert_eq!(fs::read(dir.path().join("uploads/bad.docx")).unwrap(), b"garbage");
    }

    #[test]
    fn test_update_other_extension_is_noop_success() {
        let (dir, service) = new_service(ServiceOptions::default());
        fs::create_dir_all(dir.path().join("uploads")).unwrap();
        fs::write(dir.path().join("uploads/readme.md"), b"keep").unwrap();

        let response = service.update(&UpdateRequest {
            file_path: "uploads/readme.md".to_string(),
            content: "x".to_string(),
        });
        assert_eq!(response, UpdateResponse::ok(MSG_UPDATED));
        assert_eq!(fs::read(dir.path().join("uploads/readme.md")).unwrap(), b"keep");
    }

    #[test]
    fn test_download_not_found_and_traversal() {
        let (_dir, service) = new_service(ServiceOptions::default());
        assert_eq!(service.download("missing.docx").unwrap(), DownloadOutcome::NotFound);
        assert_eq!(service.download("../Cargo.toml").unwrap(), DownloadOutcome::NotFound);
    }

    #[test]
    fn test_download_directory_is_not_found() {
        let (_dir, service) = new_service(ServiceOptions::legacy());
        service.upload(UploadedFile::new("a.pptx", b"x".to_vec()));
        // Nested layout: `uploads/a.pptx` is the directory, not the file.
        assert_eq!(service.download("a.pptx").unwrap(), DownloadOutcome::NotFound);
        assert!(matches!(
            service.download("a.pptx/a.pptx").unwrap(),
            DownloadOutcome::Found(_)
        ));
    }

    #[test]
    fn test_download_names() {
        let (_dir, service) = new_service(ServiceOptions::default());
        service.upload(UploadedFile::new("abc_report.docx", b"x".to_vec()));
        service.upload(UploadedFile::new("plain.pptx", b"y".to_vec()));

        let DownloadOutcome::Found(file) = service.download("abc_report.docx").unwrap() else {
            panic!("expected file");
        };
        assert_eq!(file.download_name, "report.docx");
        assert_eq!(
            file.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(file.bytes, b"x");

        let DownloadOutcome::Found(file) = service.download("plain.pptx").unwrap() else {
            panic!("expected file");
        };
        assert_eq!(file.download_name, "plain.pptx");

        let (_dir, verbatim) = new_service(
            ServiceOptions::default()
                .with_layout(StagingLayout::Flat)
                .with_download_name(DownloadName::Verbatim),
        );
        verbatim.upload(UploadedFile::new("abc_report.docx", b"x".to_vec()));
        let DownloadOutcome::Found(file) = verbatim.download("abc_report.docx").unwrap() else {
            panic!("expected file");
        };
        assert_eq!(file.download_name, "abc_report.docx");
    }
}
