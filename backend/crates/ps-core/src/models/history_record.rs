use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{HistoryLog, HistoryMetadata, HistoryStatus};

/// A persisted history row together with its ordered log entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: i64,
    pub uuid: String,
    pub kind: String,

    pub post_id: Option<i64>,
    pub template_id: Option<i64>,
    pub author_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub creation_method: Option<String>,

    pub status: HistoryStatus,
    pub prompt: Option<String>,
    pub generated_title: Option<String>,
    pub generated_content: Option<String>,
    pub error_message: Option<String>,

    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Ordered by `(timestamp, id)` ascending.
    #[serde(default)]
    pub logs: Vec<HistoryLog>,
}

/// Insert payload for a new history row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistory {
    pub uuid: String,
    pub kind: String,
    pub status: HistoryStatus,
    pub metadata: HistoryMetadata,
}

impl NewHistory {
    pub fn new(uuid: impl Into<String>, kind: impl Into<String>, metadata: HistoryMetadata) -> Self {
        Self {
            uuid: uuid.into(),
            kind: kind.into(),
            status: HistoryStatus::Processing,
            metadata,
        }
    }
}

impl HistoryRecord {
    pub fn metadata(&self) -> HistoryMetadata {
        HistoryMetadata {
            post_id: self.post_id,
            template_id: self.template_id,
            author_id: self.author_id,
            topic_id: self.topic_id,
            creation_method: self.creation_method.clone(),
            prompt: self.prompt.clone(),
            ..Default::default()
        }
    }
}
