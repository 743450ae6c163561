use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::application::form::{RemoteSubmissionError, SubmitError, ValidationError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote submission error: {0}")]
    RemoteSubmission(#[from] RemoteSubmissionError),

    #[error("Submission already in progress")]
    SubmissionInProgress,

    #[error("Malformed form data: {0}")]
    Multipart(#[from] MultipartError),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation(e) => AppError::Validation(e),
            SubmitError::Remote(e) => AppError::RemoteSubmission(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::RemoteSubmission(e) => {
                tracing::warn!("Remote submission error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_SUBMISSION_ERROR",
                    e.message.clone(),
                )
            }
            AppError::SubmissionInProgress => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_PROGRESS",
                "A submission is already in progress.".to_string(),
            ),
            AppError::Multipart(e) => {
                let status = e.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                (status, code, e.body_text())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
