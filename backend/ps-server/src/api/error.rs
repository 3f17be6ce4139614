//! REST API errors rendered as `{"error":{code,message,field}}`.

use ps_db::DbError;
use ps_engine::EngineError;
use ps_history::ExportError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// `{"error": {...}}`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (message, field) = match self {
            ApiError::Validation { message, field, .. } => (message, field),
            ApiError::NotFound { message, .. } | ApiError::Internal { message, .. } => {
                (message, None)
            }
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);

        match e {
            DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                ..
            } => ApiError::not_found("Resource not found"),
            DbError::NotFound { table, id, .. } => {
                ApiError::not_found(format!("{} {} not found", table, id))
            }
            DbError::Migration { message, .. } => {
                ApiError::internal(format!("Database migration error: {}", message))
            }
            _ => ApiError::internal("Database operation failed"),
        }
    }
}

impl From<ExportError> for ApiError {
    #[track_caller]
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NotFound { history_id, .. } => {
                ApiError::not_found(format!("History item {} not found", history_id))
            }
            other => {
                log::error!("Session export failed ({}): {}", other.kind(), other);
                ApiError::internal(format!("Session export failed: {}", other.kind()))
            }
        }
    }
}

impl From<EngineError> for ApiError {
    #[track_caller]
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotFound { entity, id, .. } => {
                ApiError::not_found(format!("{} {} not found", entity, id))
            }
            EngineError::Db { source, .. } => ApiError::from(source),
            other => {
                log::error!("Engine error: {}", other);
                ApiError::internal("Generation engine failure")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
