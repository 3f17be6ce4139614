use ps_core::{
    CoreError, HistoryLog, HistoryRecord, HistoryStore, HistoryType, HistoryUpdate, NewHistory,
    Result as CoreErrorResult,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct StoreInner {
    histories: Vec<HistoryRecord>,
    next_history_id: i64,
    next_log_id: i64,
}

/// Volatile [`HistoryStore`] for tests and dry runs.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    inner: Arc<RwLock<StoreInner>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a store error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> CoreErrorResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::store("in-memory store is read-only"));
        }
        Ok(())
    }

    /// Append a log row with verbatim details text, bypassing JSON encoding.
    pub async fn insert_raw_log(
        &self,
        history_id: i64,
        log_type: &str,
        details: &str,
        history_type_id: i64,
    ) -> CoreErrorResult<i64> {
        let mut inner = self.inner.write().await;
        inner.next_log_id += 1;
        let log_id = inner.next_log_id;

        let record = inner
            .histories
            .iter_mut()
            .find(|h| h.id == history_id)
            .ok_or_else(|| CoreError::store(format!("history {history_id} not found")))?;

        record.logs.push(HistoryLog {
            id: log_id,
            history_id,
            log_type: log_type.to_string(),
            history_type_id,
            timestamp: Utc::now(),
            details: details.to_string(),
        });

        Ok(log_id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.histories.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn create(&self, history: &NewHistory) -> CoreErrorResult<i64> {
        self.check_writable()?;

        let mut inner = self.inner.write().await;
        inner.next_history_id += 1;
        let id = inner.next_history_id;
        let meta = &history.metadata;

        inner.histories.push(HistoryRecord {
            id,
            uuid: history.uuid.clone(),
            kind: history.kind.clone(),
            post_id: meta.post_id,
            template_id: meta.template_id,
            author_id: meta.author_id,
            topic_id: meta.topic_id,
            creation_method: meta.creation_method.clone(),
            status: history.status,
            prompt: meta.prompt.clone(),
            generated_title: None,
            generated_content: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
            logs: Vec::new(),
        });

        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> CoreErrorResult<Option<HistoryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.histories.iter().find(|h| h.id == id).cloned())
    }

    async fn update(&self, id: i64, update: &HistoryUpdate) -> CoreErrorResult<()> {
        self.check_writable()?;

        let mut inner = self.inner.write().await;
        let record = inner
            .histories
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::store(format!("history {id} not found")))?;

        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(post_id) = update.post_id {
            record.post_id = Some(post_id);
        }
        if let Some(title) = &update.generated_title {
            record.generated_title = Some(title.clone());
        }
        if let Some(content) = &update.generated_content {
            record.generated_content = Some(content.clone());
        }
        if let Some(message) = &update.error_message {
            record.error_message = Some(message.clone());
        }
        if let Some(completed_at) = update.completed_at {
            record.completed_at = Some(completed_at);
        }

        Ok(())
    }

    async fn add_log_entry(
        &self,
        history_id: i64,
        log_type: &str,
        details: &serde_json::Value,
        history_type: HistoryType,
    ) -> CoreErrorResult<i64> {
        self.check_writable()?;
        let details = serde_json::to_string(details)?;
        self.insert_raw_log(history_id, log_type, &details, history_type.id())
            .await
    }
}
