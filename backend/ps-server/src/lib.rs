//! REST surface for the generation history, plus the server's logger.

pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    exports::download_export,
    history::{
        history::{delete_generated_post, list_generated_posts},
        history_dto::HistoryDto,
        history_list_query::HistoryListQuery,
        history_list_response::HistoryListResponse,
    },
    sessions::{
        export_query::ExportQuery,
        session_response::{SessionHistory, SessionResponse},
        sessions::{export_generation_session, get_generation_session},
    },
    templates::{
        template_dto::TemplateDto, template_list_response::TemplateListResponse,
        templates::list_templates,
    },
};
pub use error::{Result as ServerResult, ServerError};
pub use state::{AppState, EXPORTS_PATH};

pub use crate::routes::build_router;
