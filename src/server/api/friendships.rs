use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::CreateFriendshipRequest;
use crate::server::response::{ApiError, StatusResponse, StoreResultExt};
use crate::server::validation::{json_body, require_id};

use super::users::require_user;

pub async fn create_friendship(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateFriendshipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = json_body(body)?;
    let user_id = require_id(req.user_id.as_ref(), "user_id")?;
    let friend_id = require_id(req.friend_id.as_ref(), "friend_id")?;

    if user_id == friend_id {
        return Err(ApiError::bad_request("Cannot add yourself as a friend"));
    }

    let store = state.store.as_ref();
    require_user(store, user_id, "User not found")?;
    require_user(store, friend_id, "Friend not found")?;

    if store
        .add_friendship(user_id, friend_id)
        .api_err("Failed to create friendship")?
    {
        tracing::info!("Users {} and {} are now friends", user_id, friend_id);
    }

    Ok::<_, ApiError>((StatusCode::CREATED, Json(StatusResponse::ok())))
}
