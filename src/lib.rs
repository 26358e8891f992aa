//! # Poshbullet
//!
//! Share links with friends. This crate is the relationship and sharing
//! service: it resolves external identities to users, keeps the symmetric
//! friendship graph, and records every shared URL so each user gets a
//! combined inbox/outbox, newest first.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use poshbullet::server::{AppState, create_router};
//! use poshbullet::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/poshbullet.db").unwrap();
//! store.initialize().unwrap();
//!
//! let router = create_router(Arc::new(AppState::new(Arc::new(store))));
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `poshbullet` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
