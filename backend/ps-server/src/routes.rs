use crate::{
    AppState, delete_generated_post, download_export, export_generation_session,
    get_generation_session, health, list_generated_posts, list_templates,
};

use axum::{
    Router,
    routing::{delete, get},
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let max_concurrent_requests = state.config.server.max_concurrent_requests.max(1);

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        // Generation history
        .route("/api/v1/generated-posts", get(list_generated_posts))
        .route("/api/v1/generated-posts/{id}", delete(delete_generated_post))
        .route("/api/v1/generation-session/{id}", get(get_generation_session))
        .route(
            "/api/v1/generation-session/{id}/export",
            get(export_generation_session),
        )
        .route("/api/v1/templates", get(list_templates))
        // Written exports
        .route("/exports/{file_name}", get(download_export))
        .with_state(state)
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
