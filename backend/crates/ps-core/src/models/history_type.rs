use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LogType;

/// Integer classifier stored next to every log entry.
///
/// The numeric ids are part of the persisted format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum HistoryType {
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

impl HistoryType {
    pub const ALL: [HistoryType; 9] = [
        Self::Log,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::AiRequest,
        Self::AiResponse,
        Self::Debug,
        Self::Activity,
        Self::SessionMetadata,
    ];

    pub fn id(&self) -> i64 {
        match self {
            Self::Log => 1,
            Self::Error => 2,
            Self::Warning => 3,
            Self::Info => 4,
            Self::AiRequest => 5,
            Self::AiResponse => 6,
            Self::Debug => 7,
            Self::Activity => 8,
            Self::SessionMetadata => 9,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Log => "Log",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::AiRequest => "AI Request",
            Self::AiResponse => "AI Response",
            Self::Debug => "Debug",
            Self::Activity => "Activity",
            Self::SessionMetadata => "Session Metadata",
        }
    }

    /// Label for a stored id; ids outside the known range read as "Unknown".
    pub fn label_for_id(id: i64) -> &'static str {
        Self::from_id(id).map_or("Unknown", |t| t.label())
    }

    /// Classify a free-form log type string. Anything unrecognized is a plain log.
    pub fn from_log_type(log_type: &str) -> Self {
        LogType::from_str(log_type).map_or(Self::Log, |t| t.history_type())
    }
}

impl From<HistoryType> for i64 {
    fn from(value: HistoryType) -> Self {
        value.id()
    }
}

impl TryFrom<i64> for HistoryType {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, String> {
        Self::from_id(value).ok_or_else(|| format!("unknown history type id {value}"))
    }
}
