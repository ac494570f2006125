//! `ApiClient` against the real service router on a loopback port, backed
//! by the in-memory store.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use focusflow_api::config::{CorsOrigins, ServerConfig, StoreBackend};
use focusflow_api::router::build_app_router;
use focusflow_api::state::AppState;
use focusflow_core::project::NewProject;
use focusflow_core::session::{NewSession, SessionKind};
use focusflow_core::types::new_record_id;
use focusflow_db::store::MemoryStore;
use focusflow_timer::client::{ApiClient, ClientError};
use focusflow_timer::runner::SessionReporter;

/// Serve a fresh app on an ephemeral port and return a client for it.
async fn spawn_service() -> ApiClient {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        store: StoreBackend::Memory,
    };
    let app = build_app_router(
        AppState {
            store: Arc::new(MemoryStore::new()),
        },
        &config,
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(format!("http://{addr}/")).unwrap()
}

fn work_session(minute: u32) -> NewSession {
    NewSession {
        kind: SessionKind::Work,
        duration: 1500,
        date: Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap().into(),
        notes: Some("Work session".to_string()),
    }
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:5000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:5000");
}

#[tokio::test]
async fn created_session_can_be_fetched_and_listed() {
    let client = spawn_service().await;

    let stored = client.create_session(&work_session(0)).await.unwrap();
    assert_eq!(stored.kind, SessionKind::Work);
    assert_eq!(stored.duration, 1500);
    assert_eq!(stored.notes.as_deref(), Some("Work session"));

    let fetched = client.get_session(stored.id).await.unwrap();
    assert_eq!(fetched, stored);

    let later = client.create_session(&work_session(30)).await.unwrap();
    let listed = client.list_sessions().await.unwrap();
    assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![later.id, stored.id]);
}

#[tokio::test]
async fn reporter_impl_posts_the_session() {
    let client = spawn_service().await;
    let stored = client.report(work_session(5)).await.unwrap();
    assert_eq!(client.list_sessions().await.unwrap(), vec![stored]);
}

#[tokio::test]
async fn missing_session_is_an_api_error() {
    let client = spawn_service().await;
    let err = client.get_session(new_record_id()).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, ref message } if message.contains("not found"));
}

#[tokio::test]
async fn projects_round_trip() {
    let client = spawn_service().await;
    assert!(client.list_projects().await.unwrap().is_empty());

    let project = NewProject {
        name: "Thesis".to_string(),
        begin_date: "2024-01-01T00:00:00+01:00".parse().unwrap(),
        deadline: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap().into(),
    };
    let stored = client.create_project(&project).await.unwrap();
    assert_eq!(stored.name, "Thesis");
    assert_eq!(stored.begin_date, project.begin_date);

    assert_eq!(client.list_projects().await.unwrap(), vec![stored]);
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}")).unwrap();
    assert_matches!(client.list_sessions().await, Err(ClientError::Request(_)));
}
