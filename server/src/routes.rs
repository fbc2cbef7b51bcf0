//! HTTP routes
//!
//! - `GET /`, `GET /Document`, `GET /Document/Index` - upload form
//! - `POST /Document/UploadDocumant` - multipart upload, renders the editor
//! - `GET /Document/DownloadDocument?fileName=` - stored file as an attachment
//! - `POST /Document/UpdateDocumentContent` - JSON edit from the editor
//!
//! Document work is blocking file I/O and runs on the blocking pool.

use crate::views;
use crate::AppState;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use officedit::service::{MSG_FAILED, MSG_SELECT_FILE};
use officedit::{
    DownloadOutcome, DownloadedFile, UpdateRequest, UpdateResponse, UploadOutcome, UploadedFile,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "File";

/// Body of a 400 response to a failed download.
pub const MSG_DOWNLOAD_FAILED: &str = "Error downloading file.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    info!(
        web_root = %state.service.store().web_root().display(),
        max_upload_bytes = state.max_upload_bytes,
        "creating application router"
    );

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/", get(index))
        .route("/Document", get(index))
        .route("/Document/Index", get(index))
        .route("/Document/UploadDocumant", post(upload_document))
        .route("/Document/DownloadDocument", get(download_document))
        .route(
            "/Document/UpdateDocumentContent",
            post(update_document_content),
        )
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(views::index(None))
}

async fn upload_document(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let file = match read_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Html(views::index(Some(MSG_SELECT_FILE))).into_response(),
        Err(err) => {
            error!(error = %err, "failed to read multipart upload");
            return (err.status(), Html(views::index(Some(MSG_FAILED)))).into_response();
        }
    };

    let service = state.service.clone();
    match tokio::task::spawn_blocking(move || service.upload(file)).await {
        Ok(UploadOutcome::Accepted(doc)) => Html(views::editor(&doc)).into_response(),
        Ok(UploadOutcome::Rejected(message)) => {
            Html(views::index(Some(message.as_str()))).into_response()
        }
        Err(err) => {
            error!(error = %err, "upload task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::index(Some(MSG_FAILED))),
            )
                .into_response()
        }
    }
}

/// The first file field named [`UPLOAD_FIELD`], else the first file field.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    let mut fallback = None;
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let named = field.name() == Some(UPLOAD_FIELD);
        let bytes = field.bytes().await?;
        let file = UploadedFile::new(file_name, bytes.to_vec());
        if named {
            return Ok(Some(file));
        }
        fallback.get_or_insert(file);
    }
    Ok(fallback)
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
}

async fn download_document(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let Some(file_name) = query.file_name.filter(|name| !name.is_empty()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let service = state.service.clone();
    let name = file_name.clone();
    match tokio::task::spawn_blocking(move || service.download(&name)).await {
        Ok(Ok(DownloadOutcome::Found(file))) => {
            info!(file_name = %file_name, bytes = file.bytes.len(), "serving download");
            attachment(file)
        }
        Ok(Ok(DownloadOutcome::NotFound)) => {
            warn!(file_name = %file_name, "download not found");
            StatusCode::NOT_FOUND.into_response()
        }
        Ok(Err(err)) => {
            error!(file_name = %file_name, error = %err, "error downloading file");
            (StatusCode::BAD_REQUEST, MSG_DOWNLOAD_FAILED).into_response()
        }
        Err(err) => {
            error!(file_name = %file_name, error = %err, "download task failed");
            (StatusCode::BAD_REQUEST, MSG_DOWNLOAD_FAILED).into_response()
        }
    }
}

fn attachment(file: DownloadedFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&file.download_name),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

/// `attachment` disposition with an ASCII `filename` and a UTF-8 `filename*`.
fn content_disposition(name: &str) -> HeaderValue {
    let ascii: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let value = if ascii == name {
        format!("attachment; filename=\"{}\"", ascii)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            ascii,
            urlencoding::encode(name)
        )
    };
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

async fn update_document_content(
    State(state): State<AppState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Json<UpdateResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "malformed update request");
            return Json(UpdateResponse::failed(MSG_FAILED));
        }
    };

    let service = state.service.clone();
    let response = tokio::task::spawn_blocking(move || service.update(&request))
        .await
        .unwrap_or_else(|err| {
            error!(error = %err, "update task failed");
            UpdateResponse::failed(MSG_FAILED)
        });
    Json(response)
}
