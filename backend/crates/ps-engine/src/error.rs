use ps_core::{AiError, CoreError};
use ps_db::DbError;
use ps_history::HistoryError;
use ps_prompt::TemplateError;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("AI generation failed for {component}: {source} {location}")]
    Ai {
        component: String,
        #[source]
        source: AiError,
        location: ErrorLocation,
    },

    #[error("Invalid template: {source} {location}")]
    Template {
        #[source]
        source: TemplateError,
        location: ErrorLocation,
    },

    #[error("History error: {source} {location}")]
    History {
        #[source]
        source: HistoryError,
        location: ErrorLocation,
    },

    #[error("Post store error: {source} {location}")]
    Store {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Db {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("{entity} not found: {id} {location}")]
    NotFound {
        entity: &'static str,
        id: i64,
        location: ErrorLocation,
    },
}

impl EngineError {
    #[track_caller]
    pub fn ai(component: impl Into<String>, source: AiError) -> Self {
        Self::Ai {
            component: component.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TemplateError> for EngineError {
    #[track_caller]
    fn from(source: TemplateError) -> Self {
        Self::Template {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<HistoryError> for EngineError {
    #[track_caller]
    fn from(source: HistoryError) -> Self {
        Self::History {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for EngineError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for EngineError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type EngineResult<T> = StdResult<T, EngineError>;
