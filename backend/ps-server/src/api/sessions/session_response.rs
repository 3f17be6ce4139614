use ps_core::{HistoryRecord, HistoryStatus};
use ps_history::{AiCallGroup, AiCallGroups, FlatLog};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionHistory {
    pub id: i64,
    pub status: HistoryStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub generated_title: Option<String>,
    pub post_id: Option<i64>,
}

/// Admin view of one generation run
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub history: SessionHistory,
    pub logs: Vec<FlatLog>,
    pub ai_calls: Vec<AiCallGroup>,
}

impl From<HistoryRecord> for SessionResponse {
    fn from(record: HistoryRecord) -> Self {
        let AiCallGroups { logs, ai_calls } = AiCallGroups::from_logs(&record.logs);

        Self {
            history: SessionHistory {
                id: record.id,
                status: record.status,
                created_at: record.created_at,
                completed_at: record.completed_at,
                generated_title: record.generated_title,
                post_id: record.post_id,
            },
            logs,
            ai_calls,
        }
    }
}
