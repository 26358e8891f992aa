use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use poshbullet::server::{AppState, create_router};
use poshbullet::store::{SqliteStore, Store};

/// The full router over a throwaway SQLite database, driven in-process.
pub struct TestApp {
    pub store: Arc<SqliteStore>,
    router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(
            SqliteStore::new(temp_dir.path().join("poshbullet.db")).expect("open store"),
        );
        store.initialize().expect("initialize store");

        let router = create_router(Arc::new(AppState::new(store.clone())));

        Self {
            store,
            router,
            _temp_dir: temp_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("build request");
        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(path, "application/json", body.to_string())
            .await
    }

    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .expect("build request");
        self.send(request).await
    }

    /// Signs a user in through the auth endpoint and returns their id.
    pub async fn create_user(&self, provider_id: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/users/auth",
                serde_json::json!({
                    "provider": "test",
                    "provider_id": provider_id,
                    "name": name,
                    "email": format!("{provider_id}@test.com"),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "auth failed: {body}");
        body["id"].as_i64().expect("user id")
    }

    pub fn count_rows(&self, table: &str) -> i64 {
        self.store
            .connection()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .expect("count rows")
    }
}
