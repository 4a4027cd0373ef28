//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors convert into `AppError` and
//! render as an `ErrorResponse` JSON body with the status their metadata names.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mediadrop_core::{AppError, ErrorMetadata, LogLevel};
use mediadrop_processing::{SniffError, ValidationError};
use mediadrop_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (IntoResponse and AppError are both foreign to this crate)
///
/// `details` and `error_type` stay out of the body unless the handler opts in with
/// [`HttpAppError::with_details`], which it does outside production.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    expose_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError) -> Self {
        Self {
            error,
            expose_details: false,
        }
    }

    /// Include details for non-sensitive errors
    pub fn with_details(mut self, expose: bool) -> Self {
        self.expose_details = expose;
        self
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::new(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Map a storage failure onto the request-level taxonomy.
pub(crate) fn storage_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::AllocationFailed(msg) => AppError::StorageAllocation(msg),
        StorageError::WriteFailed(msg) | StorageError::AlreadyExists(msg) => {
            AppError::WriteFailure(msg)
        }
        StorageError::InvalidKey(msg) => AppError::MalformedRequest(msg),
        StorageError::DeleteFailed(msg) | StorageError::ConfigError(msg) => {
            AppError::Internal(msg)
        }
        StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError::new(storage_app_error(err))
    }
}

impl From<SniffError> for HttpAppError {
    fn from(err: SniffError) -> Self {
        HttpAppError::new(err.into())
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError::new(err.into())
    }
}

/// Multipart failures carry their own status: 413 when the body limit was hit.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::MalformedRequest(format!(
                "Failed to read multipart body: {}",
                err.body_text()
            ))
        };
        HttpAppError::new(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                detail = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Never for sensitive errors.
        let expose = self.expose_details && !app_error.is_sensitive();

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: expose.then(|| app_error.detailed_message()),
            error_type: expose.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}
