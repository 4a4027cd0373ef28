//! Multipart decoding for the upload endpoint

use crate::error::HttpAppError;
use axum::extract::Multipart;
use bytes::Bytes;
use mediadrop_processing::sanitize_filename;

/// One file part, fully buffered
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub filename: String,
    /// Content type sent by the client. Logged only; never used for classification.
    pub declared_content_type: Option<String>,
    pub data: Bytes,
}

/// Read every part of the body and keep the file parts sent under `field_name`.
///
/// The whole body is consumed before anything is stored, so a size-limit overflow
/// surfaces here and leaves no trace on disk. Parts under other names, and parts without
/// a filename, are skipped.
pub async fn decode_multipart(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Vec<DecodedFile>, HttpAppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let Some(raw_filename) = field.file_name().map(str::to_string) else {
            tracing::debug!(field = field_name, "Skipping multipart value without filename");
            continue;
        };
        let filename = sanitize_filename(&raw_filename)?;
        let declared_content_type = field.content_type().map(str::to_string);

        let data = field.bytes().await?;

        tracing::debug!(
            filename = %filename,
            declared_content_type = ?declared_content_type,
            size_bytes = data.len(),
            "Decoded multipart file"
        );

        files.push(DecodedFile {
            filename,
            declared_content_type,
            data,
        });
    }

    Ok(files)
}
