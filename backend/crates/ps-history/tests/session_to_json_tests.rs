use ps_core::{
    GeneratedPost, HistoryMetadata, HistoryType, LogType, NewPost, PostStore,
    Result as CoreErrorResult,
};
use ps_history::{
    CompletionResult, EXPORT_FILE_PREFIX, ExportSettings, HistoryContainer, InMemoryHistoryStore,
    POST_GENERATION, SessionToJson, cleanup_old_exports,
};

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use chrono::Utc;
use googletest::prelude::*;
use serde_json::{Map, json};
use tempfile::TempDir;

struct SinglePost(GeneratedPost);

#[async_trait]
impl PostStore for SinglePost {
    async fn create_post(&self, _post: &NewPost) -> CoreErrorResult<i64> {
        Ok(self.0.id)
    }

    async fn get_post(&self, id: i64) -> CoreErrorResult<Option<GeneratedPost>> {
        Ok(Some(self.0.clone()).filter(|p| p.id == id))
    }
}

fn settings(dir: &Path) -> ExportSettings {
    ExportSettings {
        dir: dir.to_path_buf(),
        base_url: "https://example.test/exports/".to_string(),
        site_name: "Green Thumb".to_string(),
        site_url: "https://example.test".to_string(),
    }
}

async fn finished_run(store: &InMemoryHistoryStore, output: &str) -> i64 {
    let metadata = HistoryMetadata::default().with_template(2);
    let mut container = HistoryContainer::open(Arc::new(store.clone()), POST_GENERATION, metadata).await;

    container
        .record(LogType::AiRequest, "AI request", Some(json!("prompt")), None, Map::new())
        .await
        .unwrap();
    container
        .record(LogType::AiResponse, "AI response", None, Some(json!(output)), Map::new())
        .await
        .unwrap();
    container
        .record(LogType::Warning, "slow", None, None, Map::new())
        .await
        .unwrap();
    container
        .complete_success(CompletionResult {
            post_id: Some(9),
            generated_title: Some("Title".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    container.id().unwrap()
}

#[tokio::test]
async fn given_encoded_output_when_generate_session_json_then_byte_identical_output() {
    // Given
    let store = InMemoryHistoryStore::new();
    let output = format!("<h2>Intro</h2>\n{}\n<p>“quoted” ünïcode</p>", "Lorem ipsum. ".repeat(60));
    let id = finished_run(&store, &output).await;
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()));

    // When
    let document = exporter.generate_session_json(id).await.unwrap();

    // Then
    let logs = &document.history_containers[0].logs;
    assert_that!(logs, len(eq(3)));
    assert_that!(logs[1].details["output"].as_str().map(str::to_string), some(eq(output.as_str())));
    assert_that!(logs[1].details.get("output_encoded"), none());
    assert_that!(logs[1].history_type_label.as_str(), eq("AI Response"));
}

#[tokio::test]
async fn given_run_when_generate_session_json_then_summary_and_statistics() {
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()));

    let document = exporter.generate_session_json(id).await.unwrap();

    assert_that!(document.metadata.generated_by.as_str(), eq("Postsmith"));
    assert_that!(document.metadata.site_name.as_str(), eq("Green Thumb"));
    assert_that!(document.post_id, some(eq(9)));
    assert_that!(document.post, none());
    assert_that!(document.history.generated_title, some(eq("Title")));
    let container = &document.history_containers[0];
    assert_that!(container.kind.as_str(), eq(POST_GENERATION));
    assert_that!(container.metadata.template_id, some(eq(2)));
    let stats = &container.statistics;
    assert_that!(stats.total_logs, eq(3));
    assert_that!(stats.ai_requests, eq(1));
    assert_that!(stats.ai_responses, eq(1));
    assert_that!(stats.warnings, eq(1));
    assert_that!(stats.errors, eq(0));
    assert_that!(stats.log_types.get(&HistoryType::Warning.id()).copied(), some(eq(1)));
    assert_that!(document.log_count(), eq(3));
}

#[tokio::test]
async fn given_post_store_when_generate_session_json_then_post_snapshot_included() {
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let post = GeneratedPost {
        id: 9,
        title: "Title".to_string(),
        content: "Body".to_string(),
        excerpt: String::new(),
        status: "draft".to_string(),
        author_id: None,
        category: None,
        tags: None,
        template_id: Some(2),
        featured_image: None,
        created_at: Utc::now(),
    };
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()))
        .with_posts(Arc::new(SinglePost(post)));

    let document = exporter.generate_session_json(id).await.unwrap();

    assert_that!(document.post.map(|p| p.content), some(eq("Body")));
}

#[tokio::test]
async fn given_malformed_log_when_exported_then_decode_error_entry() {
    // Given
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    store
        .insert_raw_log(id, "log", "{not json", HistoryType::Log.id())
        .await
        .unwrap();
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()));

    // When
    let document = exporter.generate_session_json(id).await.unwrap();

    // Then
    let last = document.history_containers[0].logs.last().unwrap();
    assert_that!(last.details["decode_error"], eq(&json!(true)));
    assert_that!(last.details["raw"], eq(&json!("{not json")));
}

#[tokio::test]
async fn given_unknown_id_when_exported_then_not_found() {
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(InMemoryHistoryStore::new()), settings(temp.path()));

    let result = exporter.generate_json_string(42, false).await;

    assert_that!(result.unwrap_err().kind(), eq("not_found"));
}

#[tokio::test]
async fn given_pretty_flag_when_generate_json_string_then_indented() {
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()));

    let pretty = exporter.generate_json_string(id, true).await.unwrap();
    let compact = exporter.generate_json_string(id, false).await.unwrap();

    assert_that!(pretty, contains_substring("\n  \"metadata\""));
    assert_that!(compact, not(contains_substring("\n")));
}

#[tokio::test]
async fn given_export_dir_when_generate_json_to_tempfile_then_file_and_deny_rule_written() {
    // Given
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");
    let exporter = SessionToJson::new(Arc::new(store), settings(&dir));

    // When
    let file = exporter.generate_json_to_tempfile(id, false).await.unwrap();

    // Then
    let name = file.path.file_name().unwrap().to_string_lossy().into_owned();
    assert_that!(name, starts_with(format!("{EXPORT_FILE_PREFIX}{id}-")));
    assert_that!(name, ends_with(".json"));
    assert_that!(name.len(), eq(format!("{EXPORT_FILE_PREFIX}{id}-").len() + 15 + 1 + 12 + 5));
    assert_that!(file.url, eq(&format!("https://example.test/exports/{name}")));
    let written = std::fs::read_to_string(&file.path).unwrap();
    assert_that!(file.size, eq(written.len() as u64));
    let htaccess = std::fs::read_to_string(dir.join(".htaccess")).unwrap();
    assert_that!(htaccess, contains_substring("Require all denied"));
}

#[tokio::test]
async fn given_export_dir_is_a_file_when_generate_json_to_tempfile_then_mkdir_failed() {
    // Given
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("exports");
    std::fs::write(&blocker, "not a directory").unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(&blocker.join("nested")));

    // When
    let result = exporter.generate_json_to_tempfile(id, false).await;

    // Then
    let err = result.unwrap_err();
    assert_that!(err.kind(), eq("mkdir_failed"));
    let entries = std::fs::read_dir(temp.path()).unwrap().count();
    assert_that!(entries, eq(1));
    assert_that!(std::fs::read_to_string(&blocker).unwrap().as_str(), eq("not a directory"));
}

#[tokio::test]
async fn given_two_exports_when_generated_then_distinct_files() {
    let store = InMemoryHistoryStore::new();
    let id = finished_run(&store, "short").await;
    let temp = TempDir::new().unwrap();
    let exporter = SessionToJson::new(Arc::new(store), settings(temp.path()));

    let first = exporter.generate_json_to_tempfile(id, false).await.unwrap();
    let second = exporter.generate_json_to_tempfile(id, false).await.unwrap();

    assert_that!(first.path, not(eq(&second.path)));
}

fn touch(dir: &Path, name: &str, age: Duration) {
    let file = File::create(dir.join(name)).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[tokio::test]
async fn given_old_and_recent_exports_when_cleanup_then_only_old_deleted() {
    // Given
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "ps-session-1-20240101-000000-aaaaaaaaaaaa.json", Duration::from_secs(7200));
    touch(temp.path(), "ps-session-2-20240101-000000-bbbbbbbbbbbb.json", Duration::from_secs(1800));

    // When
    let report = cleanup_old_exports(temp.path(), Duration::from_secs(3600)).await;

    // Then
    assert_that!(report.deleted, eq(1));
    assert_that!(report.errors, is_empty());
    assert_that!(
        temp.path().join("ps-session-1-20240101-000000-aaaaaaaaaaaa.json").exists(),
        eq(false)
    );
    assert_that!(
        temp.path().join("ps-session-2-20240101-000000-bbbbbbbbbbbb.json").exists(),
        eq(true)
    );
}

#[tokio::test]
async fn given_unrelated_old_files_when_cleanup_then_untouched() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), ".htaccess", Duration::from_secs(90_000));
    touch(temp.path(), "notes.json", Duration::from_secs(90_000));

    let report = cleanup_old_exports(temp.path(), Duration::from_secs(60)).await;

    assert_that!(report.deleted, eq(0));
    assert_that!(temp.path().join("notes.json").exists(), eq(true));
}

#[tokio::test]
async fn given_missing_dir_when_cleanup_then_empty_report() {
    let temp = TempDir::new().unwrap();

    let report = cleanup_old_exports(&temp.path().join("nope"), Duration::from_secs(60)).await;

    assert_that!(report.deleted, eq(0));
    assert_that!(report.errors, is_empty());
}
