use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::{StatusCode, header};

use crate::error::UploadError;

/// Form field carrying the PDF.
pub const FILE_FIELD: &str = "file";

/// An uploaded file with its data and client-supplied name.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `file` part out of a multipart upload.
///
/// A `file` part without a filename is treated as a plain form field and
/// skipped. Other fields are drained and ignored. A body that breaks off
/// before its first part carries no file at all.
pub async fn parse_multipart(
    mut multipart: Multipart,
    max_bytes: u64,
) -> Result<UploadedFile, UploadError> {
    let mut seen_field = false;
    loop {
        let next = match multipart.next_field().await {
            Ok(next) => next,
            Err(e) if !seen_field && e.status() != StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!(error = %e.body_text(), "multipart body has no parts");
                return Err(UploadError::NoFile);
            }
            Err(e) => return Err(multipart_error(e, max_bytes)),
        };
        let Some(mut field) = next else { break };
        seen_field = true;

        let name = field.name().unwrap_or("").to_string();
        let filename = field
            .file_name()
            .map(str::to_string)
            .or_else(|| extended_filename(&field));

        match (name.as_str(), filename) {
            (FILE_FIELD, Some(filename)) => {
                if filename.is_empty() {
                    return Err(UploadError::NoSelectedFile);
                }

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?
                {
                    if (data.len() + chunk.len()) as u64 > max_bytes {
                        return Err(UploadError::TooLarge { max_bytes });
                    }
                    data.extend_from_slice(&chunk);
                }

                return Ok(UploadedFile { filename, data });
            }
            _ => {
                // Ignore unknown fields
                field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?;
            }
        }
    }

    Err(UploadError::NoFile)
}

/// The RFC 5987 `filename*=UTF-8''<percent-encoded>` parameter, for parts
/// that carry no plain `filename`.
fn extended_filename(field: &Field<'_>) -> Option<String> {
    let disposition = field.headers().get(header::CONTENT_DISPOSITION)?.to_str().ok()?;
    parse_extended_filename(disposition)
}

fn parse_extended_filename(disposition: &str) -> Option<String> {
    let value = disposition.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("filename*")
            .then(|| value.trim().trim_matches('"'))
    })?;

    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}

fn multipart_error(e: MultipartError, max_bytes: u64) -> UploadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // Request body limit tripped before the per-file check
        UploadError::TooLarge { max_bytes }
    } else {
        UploadError::Multipart(e.body_text())
    }
}
