//! Error handling module for the resume backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the response envelope.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_AUTHENTICATED: &str = "NOT_AUTHENTICATED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_ID: &str = "INVALID_ID";
    pub const EMPTY_QUERY: &str = "EMPTY_QUERY";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DUPLICATE_ERROR: &str = "DUPLICATE_ERROR";
    pub const ATS_SERVICE_ERROR: &str = "ATS_SERVICE_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// No valid session
    Unauthorized(String),
    /// Missing or malformed input
    Validation(String),
    /// Identifier is not a well-formed UUID
    InvalidId(String),
    /// Search query missing or blank
    EmptyQuery,
    /// Missing, inactive or foreign-owned record
    NotFound(String),
    /// Unique constraint violation
    Duplicate(String),
    /// External ATS analyzer unreachable or misbehaving
    AtsUnavailable,
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyQuery => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::AtsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::NOT_AUTHENTICATED,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidId(_) => codes::INVALID_ID,
            AppError::EmptyQuery => codes::EMPTY_QUERY,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Duplicate(_) => codes::DUPLICATE_ERROR,
            AppError::AtsUnavailable => codes::ATS_SERVICE_ERROR,
            AppError::Database(_) => codes::SERVER_ERROR,
            AppError::Internal(_) => codes::SERVER_ERROR,
        }
    }

    /// Get the client-facing error message.
    ///
    /// Database and internal failures are logged where they occur and
    /// surface only a generic message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidId(msg) => msg.clone(),
            AppError::EmptyQuery => "Search query is required".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Duplicate(msg) => msg.clone(),
            AppError::AtsUnavailable => "ATS analysis service unavailable".to_string(),
            AppError::Database(_) => "Internal server error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Database(detail) | AppError::Internal(detail) => {
                write!(f, "{}: {}", self.error_code(), detail)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Duplicate("Record already exists".to_string());
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Current time in the envelope's timestamp format.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub message: String,
    pub error: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            message: error.message(),
            error: error.error_code().to_string(),
            timestamp: timestamp(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
