//! Export file download
//!
//! The export directory denies direct web access, so written exports are
//! only reachable through this route.

use crate::{ApiError, ApiResult, AppState};

use ps_history::EXPORT_FILE_PREFIX;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

/// GET /exports/{file_name}
pub async fn download_export(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Response> {
    if !is_safe_export_name(&file_name) {
        return Err(ApiError::validation("Invalid export file name", Some("file_name")));
    }

    let path = state.export.dir.join(&file_name);
    let body = match tokio::fs::read(&path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::not_found(format!("Export {} not found", file_name)));
        }
        Err(e) => {
            return Err(ApiError::internal(format!(
                "Failed to read export {}: {}",
                path.display(),
                e
            )));
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response())
}

pub(crate) fn is_safe_export_name(name: &str) -> bool {
    name.starts_with(EXPORT_FILE_PREFIX)
        && name.ends_with(".json")
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}
