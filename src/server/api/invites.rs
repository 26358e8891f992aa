use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::AcceptInviteRequest;
use crate::server::response::{ApiError, StatusResponse, StoreResultExt};
use crate::server::validation::{json_body, path_id, require_id};
use crate::types::UserId;

use super::users::require_user;

/// Accepts an invite link: the invitee and the inviter become friends.
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    path: Result<Path<UserId>, PathRejection>,
    body: Result<Json<AcceptInviteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let inviter_id = path_id(path, "Inviter not found")?;
    let req = json_body(body)?;
    let user_id = require_id(req.user_id.as_ref(), "user_id")?;

    if user_id == inviter_id {
        return Err(ApiError::bad_request("You cannot invite yourself"));
    }

    let store = state.store.as_ref();
    let inviter = require_user(store, inviter_id, "Inviter not found")?;
    require_user(store, user_id, "User not found")?;

    let already_friends = store
        .are_friends(user_id, inviter.id)
        .api_err("Failed to check friendship")?;

    if !already_friends {
        store
            .add_friendship(user_id, inviter.id)
            .api_err("Failed to accept invite")?;
        tracing::info!("User {} accepted invite from {}", user_id, inviter.id);
    }

    Ok::<_, ApiError>((StatusCode::CREATED, Json(StatusResponse::ok())))
}
