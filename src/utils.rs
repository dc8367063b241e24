use crate::consts::{DEFAULT_AUDIO_FILENAME, MAX_AUDIO_UPLOAD_BYTES};
use crate::error::AppError;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use base64::{engine, Engine};
use tracing::{debug, warn};

pub fn b64_encode(bytes: &[u8]) -> String {
    engine::general_purpose::STANDARD.encode(bytes)
}

/// Read the uploaded audio out of a multipart body.  The part may be named `audio` or `file`.
pub async fn read_audio_field(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart body"))?
    {
        if !matches!(field.name(), Some("audio") | Some("file")) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_AUDIO_FILENAME.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "audio part"))?;
        debug!(filename=%filename, len = bytes.len(), "read audio upload");
        return Ok((bytes.to_vec(), filename));
    }
    Err(AppError::validation("multipart field 'audio' is required"))
}

/// An upload over the body limit is its own error, not a malformed body.
fn multipart_error(e: MultipartError, part: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error=%e, limit = MAX_AUDIO_UPLOAD_BYTES, "audio upload too large");
        return AppError::PayloadTooLarge(format!(
            "audio upload exceeds {} MiB",
            MAX_AUDIO_UPLOAD_BYTES / (1024 * 1024)
        ));
    }
    warn!(error=%e, "failed to read {part}");
    AppError::validation(format!("malformed {part}: {e}"))
}
