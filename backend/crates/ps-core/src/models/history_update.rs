use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::HistoryStatus;

/// Partial update of a history row; `None` leaves a column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryUpdate {
    pub status: Option<HistoryStatus>,
    pub post_id: Option<i64>,
    pub generated_title: Option<String>,
    pub generated_content: Option<String>,
    pub error_message: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl HistoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.post_id.is_none()
            && self.generated_title.is_none()
            && self.generated_content.is_none()
            && self.error_message.is_none()
            && self.completed_at.is_none()
    }
}
