use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};

use crate::server::dto::IdParam;
use crate::server::response::ApiError;
use crate::types::UserId;

/// Unwraps a JSON body, reporting malformed or missing bodies as 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Unwraps a user id from the URL; anything that is not an id names no user.
pub fn path_id(
    path: Result<Path<UserId>, PathRejection>,
    message: &str,
) -> Result<UserId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found(message))
}

pub fn require_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ApiError::bad_request(format!("{field} is required"))),
    }
}

pub fn require_id(value: Option<&IdParam>, field: &str) -> Result<UserId, ApiError> {
    value
        .and_then(IdParam::resolve)
        .ok_or_else(|| ApiError::bad_request(format!("{field} is required")))
}

/// Resolves a non-empty list of ids; one bad entry rejects the whole list.
pub fn require_ids(values: Option<&[IdParam]>, field: &str) -> Result<Vec<UserId>, ApiError> {
    let values = match values {
        Some(values) if !values.is_empty() => values,
        _ => {
            return Err(ApiError::bad_request(format!(
                "{field} must be a non-empty array"
            )));
        }
    };

    values
        .iter()
        .map(|value| {
            value.resolve().ok_or_else(|| {
                ApiError::bad_request(format!("{field} contains an invalid user id"))
            })
        })
        .collect()
}
