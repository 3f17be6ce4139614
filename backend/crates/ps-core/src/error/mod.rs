use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid history status: {value} {location}")]
    InvalidHistoryStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid log type: {value} {location}")]
    InvalidLogType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON error: {source} {location}")]
    Json {
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;

/// Failure reported by an AI backend.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI backend unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("AI request failed [{code}]: {message} {location}")]
    Request {
        code: String,
        message: String,
        data: Option<serde_json::Value>,
        retryable: bool,
        location: ErrorLocation,
    },
}

impl AiError {
    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request<C: Into<String>, S: Into<String>>(code: C, message: S, retryable: bool) -> Self {
        Self::Request {
            code: code.into(),
            message: message.into(),
            data: None,
            retryable,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn with_data(mut self, value: serde_json::Value) -> Self {
        if let Self::Request { data, .. } = &mut self {
            *data = Some(value);
        }
        self
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Unavailable { .. } => "ai_unavailable",
            Self::Request { code, .. } => code,
        }
    }

    /// Message without the source location suffix.
    pub fn message(&self) -> &str {
        match self {
            Self::Unavailable { message, .. } | Self::Request { message, .. } => message,
        }
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Unavailable { .. } => None,
            Self::Request { data, .. } => data.as_ref(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable { .. } => false,
            Self::Request { retryable, .. } => *retryable,
        }
    }
}

pub type AiResult<T> = StdResult<T, AiError>;
