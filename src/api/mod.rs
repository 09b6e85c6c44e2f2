//! REST API module.
//!
//! Every handler answers with the `{success, data, message, error, timestamp}`
//! envelope; failures go through [`AppError`].

mod auth;
mod resumes;
mod skills;

pub use auth::*;
pub use resumes::*;
pub use skills::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{timestamp, AppError};

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub error: Option<String>,
    pub timestamp: String,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            error: None,
            timestamp: timestamp(),
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(ApiResponse::new(data, message))
}

/// Create a `201 Created` API response.
pub fn created<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(ApiResponse::new(data, message).with_status(StatusCode::CREATED))
}

/// Validate a path id and return it in canonical form.
pub fn parse_id(raw: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| AppError::InvalidId("Invalid resume ID format".to_string()))
}

/// Run CPU-heavy work (password hashing) off the async workers.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {e}")))?
}
