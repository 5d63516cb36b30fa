use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::connector::ValidationError;
use crate::domain::DomainError;

/// Message shown for failures the caller cannot act on.
pub const SYSTEM_ERROR_MESSAGE: &str = "System error occurred.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error returned by the JSON API handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "E400", message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.code(), err.to_string()),
            DomainError::BusinessRuleViolation { .. } => {
                Self::new(StatusCode::CONFLICT, err.code(), err.to_string())
            }
            DomainError::StorageError(_) | DomainError::Internal(_) => {
                error!("Request failed: {}", err);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.code(),
                    SYSTEM_ERROR_MESSAGE,
                )
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
