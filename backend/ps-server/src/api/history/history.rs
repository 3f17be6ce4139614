//! Generated post history handlers

use crate::api::ensure_history_id;
use crate::{ApiError, ApiResult, AppState, DeleteResponse, HistoryListQuery, HistoryListResponse};

use ps_db::HistoryQuery;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use log::info;

/// GET /api/v1/generated-posts
///
/// Paginated history, newest first
pub async fn list_generated_posts(
    State(state): State<AppState>,
    Query(query): Query<HistoryListQuery>,
) -> ApiResult<Json<HistoryListResponse>> {
    let query = HistoryQuery::try_from(query)?;
    let page = state.history_repository().list(&query).await?;

    Ok(Json(HistoryListResponse::from(page)))
}

/// DELETE /api/v1/generated-posts/{id}
///
/// Removes the history row and its log entries. The post itself is kept.
pub async fn delete_generated_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = ensure_history_id(id)?;

    if !state.history_repository().delete(id).await? {
        return Err(ApiError::not_found(format!("History item {} not found", id)));
    }

    info!("Deleted history {}", id);

    Ok(Json(DeleteResponse { deleted: true, id }))
}
