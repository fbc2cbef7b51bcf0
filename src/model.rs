//! Request and response types exchanged with the document service.
//!
//! There is no database: a [`StoredDocument`] is re-derived from the staged
//! file on every request and the file path is its only identity.

use crate::detect::extension_of;
use serde::{Deserialize, Serialize};

/// A file received from an upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub file_name: String,
    /// Raw contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an uploaded file.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Declared extension, lower-cased with the leading dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }
}

/// The editor view model produced by a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoredDocument {
    pub file_name: String,
    /// Lower-cased extension, e.g. `.docx`
    pub file_type: String,
    /// Extracted text, or the extraction error message
    pub content: String,
    /// Staged location relative to the web root, with `/` separators
    pub file_path: String,
    pub is_success: bool,
    pub message: String,
}

/// An edit submitted from the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRequest {
    /// Staged location relative to the web root
    pub file_path: String,
    /// New text
    #[serde(default)]
    pub content: String,
}

/// JSON reply to an [`UpdateRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
}

impl UpdateResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A stored file ready to be sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// Suggested name for the `Content-Disposition` header
    pub download_name: String,
}

/// Result of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file was staged; the document is ready for the editor.
    Accepted(StoredDocument),
    /// The upload was refused or could not be processed; the message is
    /// shown on the upload form.
    Rejected(String),
}

/// Result of a download lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Found(DownloadedFile),
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_extension() {
        assert_eq!(
            UploadedFile::new("Deck.PPTX", vec![]).extension().as_deref(),
            Some(".pptx")
        );
        assert_eq!(UploadedFile::new("README", vec![]).extension(), None);
    }

    #[test]
    fn test_stored_document_field_names() {
        let doc = StoredDocument {
            file_name: "a.docx".to_string(),
            file_type: ".docx".to_string(),
            content: "AB".to_string(),
            file_path: "uploads/a.docx".to_string(),
            is_success: true,
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["FileName"], "a.docx");
        assert_eq!(json["FileType"], ".docx");
        assert_eq!(json["FilePath"], "uploads/a.docx");
        assert_eq!(json["IsSuccess"], true);
    }

    #[test]
    fn test_update_request_from_editor_json() {
        let req: UpdateRequest =
            serde_json::from_str(r#"{"FilePath":"uploads/a.docx","Content":"Hello"}"#).unwrap();
        assert_eq!(req.file_path, "uploads/a.docx");
        assert_eq!(req.content, "Hello");
    }

    #[test]
    fn test_update_response_shape() {
        let json = serde_json::to_string(&UpdateResponse::failed("File not found.")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"File not found."}"#);
    }
}
