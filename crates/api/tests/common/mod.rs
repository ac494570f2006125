#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use focusflow_core::project::{NewProject, Project};
use focusflow_core::session::{NewSession, Session};
use focusflow_core::types::RecordId;
use focusflow_db::store::{MemoryStore, RecordStore};
use focusflow_db::StoreError;
use http_body_util::BodyExt;
use tower::ServiceExt;

use focusflow_api::config::{CorsOrigins, ServerConfig, StoreBackend};
use focusflow_api::router::build_app_router;
use focusflow_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        store: StoreBackend::Memory,
    }
}

/// Build the full application router over `store`, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn RecordStore>) -> Router {
    build_app_router(AppState { store }, &test_config())
}

/// Fresh in-memory store, shared so several requests can hit the same data.
pub fn memory_store() -> Arc<dyn RecordStore> {
    Arc::new(MemoryStore::new())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a body and assert it was created, returning the stored record.
pub async fn create(app: Router, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

/// A store whose every operation fails as if the database were down.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl RecordStore for UnreachableStore {
    async fn insert_session(&self, _input: NewSession) -> Result<Session, StoreError> {
        Err(unreachable())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        Err(unreachable())
    }

    async fn find_session(&self, _id: RecordId) -> Result<Option<Session>, StoreError> {
        Err(unreachable())
    }

    async fn insert_project(&self, _input: NewProject) -> Result<Project, StoreError> {
        Err(unreachable())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Err(unreachable())
    }

    async fn health_check(&self) -> bool {
        false
    }
}
