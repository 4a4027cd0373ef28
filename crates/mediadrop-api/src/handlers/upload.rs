use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::store_files;
use crate::state::AppState;
use crate::utils::upload::decode_multipart;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use mediadrop_core::{AppError, UploadMode};
use std::sync::Arc;

/// Upload one or more files
///
/// Batch mode reads every part named `upload` and answers with a JSON array of public URLs.
/// Single mode reads exactly one part named `file` and answers with the URL as plain text.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (
            status = 200,
            description = "Public URLs: JSON array in batch mode, plain text in single mode",
            body = Vec<String>
        ),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 413, description = "Request body exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Unknown or unaccepted file type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(mode = %state.config.upload_mode()))]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let expose_details = !state.config.is_production();
    handle_upload(&state, multipart)
        .await
        .map_err(|err| err.with_details(expose_details))
}

async fn handle_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::MalformedRequest(format!(
            "Invalid upload request: {}",
            rejection.body_text()
        ))
    })?;

    let mode = state.config.upload_mode();
    let files = decode_multipart(multipart, mode.field_name()).await?;

    match mode {
        UploadMode::Batch => {
            let urls = store_files(state, files).await?;
            Ok(Json(urls).into_response())
        }
        UploadMode::Single => {
            match files.len() {
                0 => {
                    return Err(AppError::MalformedRequest("No file provided".to_string()).into())
                }
                1 => {}
                n => {
                    return Err(AppError::MalformedRequest(format!(
                        "Expected exactly one '{}' field, got {}",
                        mode.field_name(),
                        n
                    ))
                    .into())
                }
            }
            let mut urls = store_files(state, files).await?;
            let url = urls
                .pop()
                .ok_or_else(|| AppError::Internal("No URL produced".to_string()))?;
            Ok(url.into_response())
        }
    }
}
