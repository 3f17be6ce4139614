use ps_core::{HistoryRecord, HistoryStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// History row as listed by the API, without log entries.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryDto {
    pub id: i64,
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: HistoryStatus,
    pub post_id: Option<i64>,
    pub template_id: Option<i64>,
    pub author_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub creation_method: Option<String>,
    pub generated_title: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<HistoryRecord> for HistoryDto {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id,
            uuid: record.uuid,
            kind: record.kind,
            status: record.status,
            post_id: record.post_id,
            template_id: record.template_id,
            author_id: record.author_id,
            topic_id: record.topic_id,
            creation_method: record.creation_method,
            generated_title: record.generated_title,
            error_message: record.error_message,
            created_at: record.created_at,
            completed_at: record.completed_at,
        }
    }
}
