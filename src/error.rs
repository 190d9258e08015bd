//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure surfaced to a client is one of four classes, each with a fixed
//! status code. The response body is always `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Message sent to clients for any storage-class failure.
const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors produced by validation, the store, and request handling.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or self-referential URL, malformed code, malformed body. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// No record for the requested code. Maps to 404.
    #[error("{0}")]
    NotFound(String),

    /// The requested code is already taken. Maps to 409.
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure or exhausted code allocation. Maps to 500.
    ///
    /// The message is for logs only; clients receive a generic body.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            AppError::Internal(_) => SERVER_ERROR_MESSAGE.to_string(),
            AppError::Validation(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict("Code already exists");
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal(format!("Database error: {e}"))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        tracing::error!(error = %e, "Migration error");
        AppError::internal(format!("Migration error: {e}"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}
