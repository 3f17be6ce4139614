//! Generation session handlers

use crate::api::ensure_history_id;
use crate::{ApiError, ApiResult, AppState, ExportQuery, SessionResponse};

use ps_history::EXPORT_FILE_PREFIX;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use log::debug;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// GET /api/v1/generation-session/{id}
pub async fn get_generation_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<SessionResponse>> {
    let id = ensure_history_id(id)?;

    let record = state
        .history_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("History item {} not found", id)))?;

    Ok(Json(SessionResponse::from(record)))
}

/// GET /api/v1/generation-session/{id}/export
///
/// Downloads the full session document. Large sessions are written to the
/// export directory first and streamed back from there.
pub async fn export_generation_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let id = ensure_history_id(id)?;
    let pretty = query.pretty.unwrap_or(true);

    let log_count = state.history_repository().find_logs(id).await?.len();
    let exporter = state.session_to_json();

    let (file_name, body) = if log_count >= state.config.export.tempfile_log_threshold {
        let export = exporter.generate_json_to_tempfile(id, pretty).await?;
        let body = tokio::fs::read(&export.path).await.map_err(|e| {
            ApiError::internal(format!("Failed to read export {}: {}", export.path.display(), e))
        })?;
        let file_name = export
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| download_name(id));

        debug!("Serving history {} export from {}", id, export.url);
        (file_name, body)
    } else {
        let json = exporter.generate_json_string(id, pretty).await?;
        (download_name(id), json.into_bytes())
    };

    Ok((
        [
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response())
}

fn download_name(id: i64) -> String {
    format!(
        "{}{}-{}.json",
        EXPORT_FILE_PREFIX,
        id,
        Local::now().format("%Y%m%d-%H%M%S")
    )
}
