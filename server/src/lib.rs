//! # officedit-server
//!
//! Web front end for [`officedit`]: an upload form, a plain-text editor for
//! the uploaded document and a download endpoint.

pub mod config;
pub mod routes;
pub mod views;

use officedit::DocumentService;
use std::sync::Arc;

pub use routes::create_router;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<DocumentService>,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: DocumentService, max_upload_bytes: usize) -> Self {
        Self {
            service: Arc::new(service),
            max_upload_bytes,
        }
    }
}
