use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::CreateShareRequest;
use crate::server::response::{ApiError, StatusResponse, StoreResultExt};
use crate::server::validation::{json_body, require_id, require_ids, require_text};

pub async fn create_shares(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateShareRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = json_body(body)?;
    let sender_id = require_id(req.sender_id.as_ref(), "sender_id")?;
    let receiver_ids = require_ids(req.friend_ids.as_deref(), "friend_ids")?;
    let url = require_text(req.url, "url")?;

    let shares = state
        .store
        .record_shares(sender_id, &receiver_ids, &url)
        .api_err("Failed to share url")?;

    tracing::info!("User {} shared a url with {} friend(s)", sender_id, shares.len());

    Ok::<_, ApiError>((StatusCode::CREATED, Json(StatusResponse::ok())))
}
