use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use pdftext_core::UploadId;

use crate::error::UploadError;
use crate::state::AppState;
use crate::upload;

/// Download name offered to the client, identical for every upload.
pub const ATTACHMENT_DISPOSITION: &str = "attachment; filename=\"extracted_text.txt\"";

pub const X_UPLOAD_ID: HeaderName = HeaderName::from_static("x-upload-id");
pub const X_ORIGINAL_FILENAME: HeaderName = HeaderName::from_static("x-original-filename");

/// `POST /upload`: store the PDF, extract its text and send the text back
/// as an attachment.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, UploadError> {
    // Non-multipart requests carry no file at all
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "request is not multipart");
        UploadError::NoFile
    })?;

    let file = upload::parse_multipart(multipart, state.max_upload_bytes).await?;

    let upload_id = UploadId::new();
    tracing::info!(
        upload_id = %upload_id,
        filename = ?file.filename,
        bytes = file.data.len(),
        "received upload"
    );

    let pdf_path = state.storage.save_upload(upload_id, &file.data).await?;
    drop(file.data);

    let text = extract_blocking(&state, pdf_path).await?;
    let artifact = state.storage.write_artifact(upload_id, &text).await?;

    tracing::info!(
        upload_id = %upload_id,
        chars = text.chars().count(),
        "extraction complete"
    );

    attachment(upload_id, &file.filename, &artifact).await
}

/// Run the backend on tokio's blocking pool, bounded by the configured timeout.
///
/// On timeout the blocking thread keeps running; its result is dropped.
async fn extract_blocking(state: &AppState, path: PathBuf) -> Result<String, UploadError> {
    let backend = Arc::clone(&state.backend);
    let mode = state.separator;
    let task = tokio::task::spawn_blocking(move || {
        pdftext_core::extract_text(&path, backend.as_ref(), mode)
    });

    match tokio::time::timeout(state.extraction_timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(e)) => Err(UploadError::Internal {
            operation: format!("join extraction task: {e}"),
        }),
        Err(_) => Err(UploadError::Timeout {
            secs: state.extraction_timeout.as_secs(),
        }),
    }
}

/// Stream the artifact back as a downloadable attachment.
async fn attachment(
    upload_id: UploadId,
    original_filename: &str,
    artifact: &Path,
) -> Result<Response, UploadError> {
    let file = tokio::fs::File::open(artifact)
        .await
        .map_err(|e| UploadError::Internal {
            operation: format!("open artifact {}: {e}", artifact.display()),
        })?;
    let len = file
        .metadata()
        .await
        .map_err(|e| UploadError::Internal {
            operation: format!("stat artifact {}: {e}", artifact.display()),
        })?
        .len();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static(ATTACHMENT_DISPOSITION),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    let id_value =
        HeaderValue::from_str(&upload_id.to_string()).map_err(|e| UploadError::Internal {
            operation: format!("encode upload id header: {e}"),
        })?;
    headers.insert(X_UPLOAD_ID, id_value);
    // Non-ASCII names are not valid header values; skip rather than fail
    if let Ok(value) = HeaderValue::from_str(original_filename) {
        headers.insert(X_ORIGINAL_FILENAME, value);
    }

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((StatusCode::OK, headers, body).into_response())
}
