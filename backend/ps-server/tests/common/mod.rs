#![allow(dead_code)]

//! Test infrastructure for ps-server API tests

use ps_config::Config;
use ps_core::{HistoryMetadata, HistoryStatus, HistoryType, HistoryUpdate, NewHistory, Template};
use ps_db::{HistoryRepository, TemplateRepository};
use ps_server::AppState;

use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/ps-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// AppState with exports going to a temp directory. Keep the TempDir alive
/// for the duration of the test.
pub async fn create_test_app_state() -> (AppState, TempDir) {
    create_test_app_state_with(Config::default()).await
}

pub async fn create_test_app_state_with(config: Config) -> (AppState, TempDir) {
    let pool = create_test_pool().await;
    let export_dir = TempDir::new().expect("Failed to create export dir");
    let state = AppState::with_export_dir(pool, config, export_dir.path().join("exports"));

    (state, export_dir)
}

static NEXT_UUID: AtomicU64 = AtomicU64::new(1);

/// Insert a history row; `completed` marks it completed with a title.
pub async fn create_test_history(
    pool: &SqlitePool,
    template_id: i64,
    title: Option<&str>,
) -> i64 {
    let repo = HistoryRepository::new(pool.clone());
    let id = repo
        .insert(&NewHistory::new(
            format!("test-uuid-{}", NEXT_UUID.fetch_add(1, Ordering::Relaxed)),
            "post_generation",
            HistoryMetadata::default()
                .with_template(template_id)
                .with_creation_method("scheduled"),
        ))
        .await
        .expect("Failed to create history");

    if let Some(title) = title {
        repo.apply_update(
            id,
            &HistoryUpdate {
                status: Some(HistoryStatus::Completed),
                generated_title: Some(title.to_string()),
                completed_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to complete history");
    }

    id
}

/// Append a request/response pair for one component.
pub async fn create_test_ai_call(pool: &SqlitePool, history_id: i64, component: &str) {
    let repo = HistoryRepository::new(pool.clone());
    repo.insert_log(
        history_id,
        "ai_request",
        &json!({
            "input": { "prompt": format!("{} prompt", component) },
            "context": { "component": component },
        }),
        HistoryType::AiRequest,
    )
    .await
    .expect("Failed to log request");
    repo.insert_log(
        history_id,
        "ai_response",
        &json!({
            "output": format!("{} output", component),
            "context": { "component": component },
        }),
        HistoryType::AiResponse,
    )
    .await
    .expect("Failed to log response");
}

pub async fn create_test_template(pool: &SqlitePool, name: &str, active: bool) -> i64 {
    let mut template = Template::new(0, name, "Write about {{topic}}");
    template.is_active = active;
    TemplateRepository::new(pool.clone())
        .create(&template)
        .await
        .expect("Failed to create template")
}

pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>, http::HeaderMap) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    (status, body, headers)
}

pub async fn send_json(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(app, method, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
