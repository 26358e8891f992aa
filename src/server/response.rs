use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result as StoreResult};

/// Body returned by write endpoints on success.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Extension trait for converting store results to API errors with a context message.
pub trait StoreResultExt<T> {
    fn api_err(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn api_err(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            Error::BadRequest(reason) => ApiError::bad_request(reason),
            e => {
                tracing::error!("{message}: {e}");
                ApiError::internal(format!("{message}: {e}"))
            }
        })
    }
}

/// Extension for Option types from store operations.
pub trait StoreOptionExt<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreOptionExt<T> for Option<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::not_found(message))
    }
}
