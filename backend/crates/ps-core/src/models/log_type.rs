use crate::{CoreError, HistoryType, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Semantic kind of a history log entry, as written by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    Log,
    Error,
    Warning,
    Info,
    AiRequest,
    AiResponse,
    Debug,
    Activity,
    SessionMetadata,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::AiRequest => "ai_request",
            Self::AiResponse => "ai_response",
            Self::Debug => "debug",
            Self::Activity => "activity",
            Self::SessionMetadata => "session_metadata",
        }
    }

    pub fn history_type(&self) -> HistoryType {
        match self {
            Self::Log => HistoryType::Log,
            Self::Error => HistoryType::Error,
            Self::Warning => HistoryType::Warning,
            Self::Info => HistoryType::Info,
            Self::AiRequest => HistoryType::AiRequest,
            Self::AiResponse => HistoryType::AiResponse,
            Self::Debug => HistoryType::Debug,
            Self::Activity => HistoryType::Activity,
            Self::SessionMetadata => HistoryType::SessionMetadata,
        }
    }
}

impl FromStr for LogType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "log" => Ok(Self::Log),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "ai_request" => Ok(Self::AiRequest),
            "ai_response" => Ok(Self::AiResponse),
            "debug" => Ok(Self::Debug),
            "activity" => Ok(Self::Activity),
            "session_metadata" => Ok(Self::SessionMetadata),
            _ => Err(CoreError::InvalidLogType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
