mod friendships;
mod invites;
mod shares;
mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // User routes
        .route("/users/auth", post(users::auth_user))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/friends", get(users::list_friends))
        .route("/users/{id}/history", get(users::get_history))
        // Friendship routes
        .route("/friendships", post(friendships::create_friendship))
        .route("/invites/{inviter_id}/accept", post(invites::accept_invite))
        // Share routes
        .route("/shares", post(shares::create_shares))
}
