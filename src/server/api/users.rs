use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{AuthUserRequest, TextParam};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::server::validation::{json_body, path_id, require_text};
use crate::store::Store;
use crate::types::{NewUser, User, UserId};

/// Loads a user or fails with 404.
pub(super) fn require_user(
    store: &dyn Store,
    id: UserId,
    message: &'static str,
) -> Result<User, ApiError> {
    store
        .get_user(id)
        .api_err("Failed to get user")?
        .or_not_found(message)
}

pub async fn auth_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AuthUserRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = json_body(body)?;
    let provider = require_text(req.provider, "provider")?;
    let provider_id = require_text(req.provider_id.map(TextParam::into_string), "provider_id")?;

    let user = state
        .store
        .resolve_or_create_user(&NewUser {
            provider,
            provider_id,
            name: req.name,
            email: req.email,
            avatar_url: req.avatar_url,
        })
        .api_err("Failed to resolve user")?;

    tracing::debug!("Resolved {}:{} to user {}", user.provider, user.provider_id, user.id);

    Ok::<_, ApiError>(Json(user))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<UserId>, PathRejection>,
) -> impl IntoResponse {
    let id = path_id(path, "User not found")?;
    let user = require_user(state.store.as_ref(), id, "User not found")?;

    Ok::<_, ApiError>(Json(user))
}

pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    path: Result<Path<UserId>, PathRejection>,
) -> impl IntoResponse {
    let id = path_id(path, "User not found")?;
    let friends = state
        .store
        .list_friends(id)
        .api_err("Failed to list friends")?;

    Ok::<_, ApiError>(Json(friends))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    path: Result<Path<UserId>, PathRejection>,
) -> impl IntoResponse {
    let id = path_id(path, "User not found")?;
    let history = state.store.history(id).api_err("Failed to load history")?;

    Ok::<_, ApiError>(Json(history))
}
