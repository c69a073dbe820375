use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use scribe_application::ApplicationError;
use scribe_domain::DomainError;

/// External failure shape: validation and not-found responses carry
/// `message` and `error`; runtime failures additionally carry the
/// rendered error as `traceback`.
#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    NotFound { message: String },
    Internal { message: String, traceback: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Request validation failed",
                    "error": message,
                })),
            )
                .into_response(),
            HttpError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "message": "No record exists for the requested key",
                    "error": message,
                })),
            )
                .into_response(),
            HttpError::Internal { message, traceback } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Error occurred while handling the request",
                    "error": message,
                    "traceback": traceback,
                })),
            )
                .into_response(),
        }
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    match error {
        ApplicationError::Validation(message) => HttpError::Validation { message },
        ApplicationError::Domain(DomainError::Validation { message }) => {
            HttpError::Validation { message }
        }
        ApplicationError::Domain(DomainError::NotFound { message }) => {
            HttpError::NotFound { message }
        }
        ApplicationError::Domain(error) => HttpError::Internal {
            message: error.to_string(),
            traceback: format!("{error:?}"),
        },
    }
}
