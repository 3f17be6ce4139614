use crate::{HistoryRecord, HistoryType, HistoryUpdate, NewHistory, Result};

use async_trait::async_trait;

/// Persistence seam for history containers.
///
/// Implementations must return log entries ordered by `(timestamp, id)`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn create(&self, history: &NewHistory) -> Result<i64>;

    async fn get_by_id(&self, id: i64) -> Result<Option<HistoryRecord>>;

    async fn update(&self, id: i64, update: &HistoryUpdate) -> Result<()>;

    async fn add_log_entry(
        &self,
        history_id: i64,
        log_type: &str,
        details: &serde_json::Value,
        history_type: HistoryType,
    ) -> Result<i64>;
}
