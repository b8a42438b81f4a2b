//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Every failure in the registration flow is classified into exactly one
/// of these variants before it reaches a caller.
#[derive(Error, Debug)]
pub enum AppError {
    // Caller-supplied data violates a required-field rule
    #[error("{0}")]
    Validation(String),

    // Uniqueness constraint violated on insert
    #[error("{0} already exists")]
    Duplicate(String),

    // Credential hashing failed (internal, never caused by input content)
    #[error("Password hashing failed")]
    Hashing(String),

    // Storage rejected the operation for a reason other than uniqueness
    #[error("Storage error")]
    Storage(DbErr),

    // Storage round-trip exceeded the configured deadline
    #[error("Storage operation timed out")]
    StorageTimeout,

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Classify database errors, routing unique-index violations to the
/// duplicate variant. The storage layer's constraint-violation signal is
/// the single source of truth for duplicate detection.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Duplicate("Username or email".to_string())
            }
            _ => AppError::Storage(err),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Duplicate(_) => "DUPLICATE",
            AppError::Hashing(_) => "HASHING_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::StorageTimeout => "STORAGE_TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::Hashing(_)
            | AppError::Storage(_)
            | AppError::StorageTimeout
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::Duplicate(what) => format!("{} already exists", what),

            // Hide details for internal errors
            AppError::Hashing(e) => {
                tracing::error!("Hashing error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "A storage error occurred".to_string()
            }
            AppError::StorageTimeout => {
                tracing::error!("Storage operation timed out");
                "A storage error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn duplicate(what: impl Into<String>) -> Self {
        AppError::Duplicate(what.into())
    }

    pub fn hashing(msg: impl Into<String>) -> Self {
        AppError::Hashing(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
