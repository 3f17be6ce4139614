use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::HistoryType;

/// One append-only entry in a history container.
///
/// `details` is the JSON text exactly as stored; readers decode it
/// themselves so that malformed rows can still be exported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryLog {
    pub id: i64,
    pub history_id: i64,
    pub log_type: String,
    pub history_type_id: i64,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

impl HistoryLog {
    pub fn history_type_label(&self) -> &'static str {
        HistoryType::label_for_id(self.history_type_id)
    }

    pub fn parse_details(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.details)
    }
}
