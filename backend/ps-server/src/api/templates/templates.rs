use crate::{ApiResult, AppState, TemplateDto, TemplateListResponse};

use ps_engine::Catalog;

use axum::{Json, extract::State};

/// GET /api/v1/templates
pub async fn list_templates(State(state): State<AppState>) -> ApiResult<Json<TemplateListResponse>> {
    let templates = Catalog::new(state.pool.clone()).active_templates().await?;

    Ok(Json(TemplateListResponse {
        templates: templates.into_iter().map(TemplateDto::from).collect(),
    }))
}
