use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Template validation failure.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(
        "Template has unclosed variable braces. Each {{{{ must have a matching }}}} ({open} open, {close} close) {location}"
    )]
    UnclosedBraces {
        open: usize,
        close: usize,
        location: ErrorLocation,
    },

    #[error("Unknown variable: {{{{{name}}}}}. Available variables: {available} {location}")]
    InvalidVariable {
        name: String,
        available: String,
        location: ErrorLocation,
    },
}

impl TemplateError {
    #[track_caller]
    pub fn unclosed_braces(open: usize, close: usize) -> Self {
        Self::UnclosedBraces {
            open,
            close,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_variable(name: impl Into<String>, available: &[String]) -> Self {
        let available = available
            .iter()
            .map(|v| format!("{{{{{v}}}}}"))
            .collect::<Vec<_>>()
            .join(", ");

        Self::InvalidVariable {
            name: name.into(),
            available,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnclosedBraces { .. } => "unclosed_braces",
            Self::InvalidVariable { .. } => "invalid_variable",
        }
    }
}

pub type TemplateResult<T> = StdResult<T, TemplateError>;

/// Failure to compose an article-structure prompt.
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Article structure not found: {id} {location}")]
    StructureNotFound { id: i64, location: ErrorLocation },

    #[error("Article structure is inactive: {id} {location}")]
    StructureInactive { id: i64, location: ErrorLocation },

    #[error("Article structure {id} has invalid data: {message} {location}")]
    InvalidStructureData {
        id: i64,
        message: String,
        location: ErrorLocation,
    },

    #[error("Prompt section missing or inactive: {key} {location}")]
    SectionMissing { key: String, location: ErrorLocation },

    #[error("No article structures available {location}")]
    NoStructures { location: ErrorLocation },
}

impl CompositionError {
    #[track_caller]
    pub(crate) fn not_found(id: i64) -> Self {
        Self::StructureNotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn inactive(id: i64) -> Self {
        Self::StructureInactive {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn invalid_data(id: i64, message: impl Into<String>) -> Self {
        Self::InvalidStructureData {
            id,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn section_missing(key: impl Into<String>) -> Self {
        Self::SectionMissing {
            key: key.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn no_structures() -> Self {
        Self::NoStructures {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type CompositionResult<T> = StdResult<T, CompositionError>;
