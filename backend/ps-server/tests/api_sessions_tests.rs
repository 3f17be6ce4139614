mod common;

use common::{
    create_test_ai_call, create_test_app_state, create_test_app_state_with, create_test_history,
    send, send_json,
};

use ps_config::Config;
use ps_core::HistoryType;
use ps_db::HistoryRepository;
use ps_server::build_router;

use http::{StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_get_generation_session_groups_ai_calls() {
    let (state, _dir) = create_test_app_state().await;
    let id = create_test_history(&state.pool, 1, Some("Grouped")).await;
    create_test_ai_call(&state.pool, id, "content").await;
    create_test_ai_call(&state.pool, id, "title_prompt").await;
    HistoryRepository::new(state.pool.clone())
        .insert_log(
            id,
            "warning",
            &json!({ "message": "AI variables could not be resolved" }),
            HistoryType::Warning,
        )
        .await
        .unwrap();
    let app = build_router(state);

    let (status, json) =
        send_json(app, "GET", &format!("/api/v1/generation-session/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["history"]["id"], id);
    assert_eq!(json["history"]["status"], "completed");
    assert_eq!(json["history"]["generated_title"], "Grouped");

    let calls = json["ai_calls"].as_array().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["type"], "content");
    assert_eq!(calls[1]["type"], "title_prompt");
    assert_eq!(calls[1]["label"], "Title prompt");
    assert_eq!(calls[0]["response"]["output"], "content output");

    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["type"], "Warning");
}

#[tokio::test]
async fn test_get_generation_session_zero_id_is_validation_error() {
    let (state, _dir) = create_test_app_state().await;
    let app = build_router(state);

    let (status, json) = send_json(app, "GET", "/api/v1/generation-session/0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "id");
}

#[tokio::test]
async fn test_get_generation_session_not_found() {
    let (state, _dir) = create_test_app_state().await;
    let app = build_router(state);

    let (status, json) = send_json(app, "GET", "/api/v1/generation-session/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_export_generation_session_inline_download() {
    let (state, dir) = create_test_app_state().await;
    let id = create_test_history(&state.pool, 1, Some("Exported")).await;
    create_test_ai_call(&state.pool, id, "content").await;
    let app = build_router(state);

    let (status, body, headers) = send(
        app,
        "GET",
        &format!("/api/v1/generation-session/{}/export?pretty=false", id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with(&format!("attachment; filename=\"ps-session-{}-", id)));

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["history"]["id"], id);
    assert_eq!(json["history_containers"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["history_containers"][0]["logs"].as_array().unwrap().len(),
        2
    );

    // Small sessions never touch the export directory
    assert!(!dir.path().join("exports").exists());
}

#[tokio::test]
async fn test_export_generation_session_large_session_written_to_export_dir() {
    let mut config = Config::default();
    config.export.tempfile_log_threshold = 2;
    let (state, dir) = create_test_app_state_with(config).await;
    let id = create_test_history(&state.pool, 1, Some("Large")).await;
    create_test_ai_call(&state.pool, id, "content").await;
    let app = build_router(state);

    let (status, body, headers) = send(
        app.clone(),
        "GET",
        &format!("/api/v1/generation-session/{}/export", id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["history"]["generated_title"], "Large");

    let export_dir = dir.path().join("exports");
    assert!(export_dir.join(".htaccess").exists());
    let written: Vec<String> = std::fs::read_dir(&export_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    assert_eq!(written.len(), 1);

    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert_eq!(disposition, format!("attachment; filename=\"{}\"", written[0]));

    // The written file is reachable through the exports route
    let (status, served, _) = send(app, "GET", &format!("/exports/{}", written[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, body);
}

#[tokio::test]
async fn test_export_generation_session_not_found() {
    let (state, _dir) = create_test_app_state().await;
    let app = build_router(state);

    let (status, json) = send_json(app, "GET", "/api/v1/generation-session/77/export").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "History item 77 not found");
}

#[tokio::test]
async fn test_download_export_rejects_foreign_names() {
    let (state, _dir) = create_test_app_state().await;
    let app = build_router(state);

    let (status, _) = send_json(app.clone(), "GET", "/exports/config.toml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(app, "GET", "/exports/ps-session-1-missing.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
