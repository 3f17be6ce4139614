//! One generation run's audit trail.
//!
//! A container is `processing` from the moment its row is persisted until
//! the first `complete_success` or `complete_failure`; the first
//! completion is final. Log entries may still be appended afterwards.

use crate::error::{HistoryError, HistoryResult};
use crate::generation_session::{GenerationSession, SessionOutcome, TemplateSnapshot};
use crate::log_details::LogDetails;

use ps_core::{
    AiError, HistoryMetadata, HistoryStatus, HistoryStore, HistoryUpdate, LogType, NewHistory,
    Voice,
};

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Error details reported by an external service (typically the AI backend).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalError {
    pub code: String,
    pub message: String,
    pub data: Option<Value>,
}

impl From<&AiError> for ExternalError {
    fn from(error: &AiError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message().to_string(),
            data: error.data().cloned(),
        }
    }
}

/// The user behind a manual action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Actor {
    pub user_id: i64,
    pub user_login: String,
}

/// Fields recorded on successful completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
    /// Image reference attached to the post; kept in the session outcome only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

pub struct HistoryContainer {
    uuid: String,
    id: Option<i64>,
    kind: String,
    metadata: HistoryMetadata,
    status: HistoryStatus,
    store: Arc<dyn HistoryStore>,
    session: Option<GenerationSession>,
    last_error: Option<String>,
}

impl HistoryContainer {
    /// Create a container and persist its row as `processing`.
    ///
    /// A store failure leaves the container unpersisted; every later
    /// operation then returns [`HistoryError::NotPersisted`].
    pub async fn open(
        store: Arc<dyn HistoryStore>,
        kind: impl Into<String>,
        metadata: HistoryMetadata,
    ) -> Self {
        let uuid = Uuid::new_v4().to_string();
        let kind = kind.into();
        let new_history = NewHistory::new(uuid.clone(), kind.clone(), metadata.clone());

        let id = match store.create(&new_history).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to persist history container {}: {}", uuid, e);
                None
            }
        };

        Self {
            uuid,
            id,
            kind,
            metadata,
            status: HistoryStatus::Processing,
            store,
            session: None,
            last_error: None,
        }
    }

    /// Rebuild a container around an existing row.
    pub async fn load_existing(
        store: Arc<dyn HistoryStore>,
        id: i64,
    ) -> HistoryResult<Option<Self>> {
        let Some(record) = store.get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(Self {
            uuid: record.uuid.clone(),
            id: Some(record.id),
            kind: record.kind.clone(),
            metadata: record.metadata(),
            status: record.status,
            store,
            session: None,
            last_error: record.error_message.clone(),
        }))
    }

    /// Attach a session tracker; replaces any previous one.
    pub fn with_session(mut self, template: TemplateSnapshot, voice: Option<Voice>) -> Self {
        self.session = Some(GenerationSession::start(template, voice));
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn metadata(&self) -> &HistoryMetadata {
        &self.metadata
    }

    pub fn status(&self) -> HistoryStatus {
        self.status
    }

    pub fn session(&self) -> Option<&GenerationSession> {
        self.session.as_ref()
    }

    fn persisted_id(&self) -> HistoryResult<i64> {
        self.id.ok_or_else(|| HistoryError::not_persisted())
    }

    /// Append a log entry and return its id.
    ///
    /// Session counters and `last_error` change only once the entry is stored.
    pub async fn record(
        &mut self,
        log_type: LogType,
        message: &str,
        input: Option<Value>,
        output: Option<Value>,
        context: Map<String, Value>,
    ) -> HistoryResult<i64> {
        let history_id = self.persisted_id()?;

        let details = LogDetails::new(message, input, output, context);
        let payload = serde_json::to_value(&details).map_err(ps_core::CoreError::from)?;

        let log_id = self
            .store
            .add_log_entry(history_id, log_type.as_str(), &payload, log_type.history_type())
            .await?;

        // Counters only reflect entries that were stored.
        match log_type {
            LogType::AiRequest => {
                if let Some(session) = self.session.as_mut() {
                    session.log_ai_call();
                }
            }
            LogType::Error => {
                if let Some(session) = self.session.as_mut() {
                    session.add_error();
                }
                self.last_error = Some(message.to_string());
            }
            _ => {}
        }

        match &details.context {
            Some(context) => debug!(
                "[history {}] [{}] {} | context: {}",
                history_id,
                log_type.as_str().to_uppercase(),
                message,
                Value::Object(context.clone())
            ),
            None => debug!(
                "[history {}] [{}] {}",
                history_id,
                log_type.as_str().to_uppercase(),
                message
            ),
        }

        Ok(log_id)
    }

    /// Record an `error` entry with diagnostic context.
    ///
    /// Diagnostic keys override caller keys of the same name.
    pub async fn record_error(
        &mut self,
        message: &str,
        error_details: Map<String, Value>,
        external_error: Option<&ExternalError>,
    ) -> HistoryResult<i64> {
        let (input, output, mut context) = split_payload(error_details);
        let memory = read_memory_usage();

        context.insert("timestamp".to_string(), json!(epoch_seconds()));
        context.insert("last_error".to_string(), json!(self.last_error));
        context.insert("memory_usage".to_string(), json!(memory.map(|m| m.0)));
        context.insert("memory_peak".to_string(), json!(memory.map(|m| m.1)));

        if let Some(external) = external_error {
            context.insert("error_code".to_string(), json!(external.code));
            context.insert("error_message".to_string(), json!(external.message));
            context.insert("error_data".to_string(), json!(external.data));
        }

        self.record(LogType::Error, message, input, output, context)
            .await
    }

    /// Record an `activity` entry for a human-triggered action.
    pub async fn record_user_action(
        &mut self,
        action: &str,
        message: &str,
        action_data: Map<String, Value>,
        actor: &Actor,
    ) -> HistoryResult<i64> {
        let (input, output, mut context) = split_payload(action_data);

        context.insert("action_type".to_string(), json!(action));
        context.insert("user_id".to_string(), json!(actor.user_id));
        context.insert("user_login".to_string(), json!(actor.user_login));
        context.insert("timestamp".to_string(), json!(epoch_seconds()));
        context.insert("source".to_string(), json!("manual_ui"));

        self.record(LogType::Activity, message, input, output, context)
            .await
    }

    fn ensure_open(&self) -> HistoryResult<i64> {
        let id = self.persisted_id()?;
        if self.status.is_terminal() {
            return Err(HistoryError::already_completed(self.status.as_str()));
        }
        Ok(id)
    }

    pub async fn complete_success(&mut self, result: CompletionResult) -> HistoryResult<()> {
        let history_id = self.ensure_open()?;

        if let Some(session) = self.session.as_mut() {
            let data = match serde_json::to_value(&result) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            };
            session.complete(SessionOutcome {
                success: true,
                data,
            });
        }

        let update = HistoryUpdate {
            status: Some(HistoryStatus::Completed),
            post_id: result.post_id,
            generated_title: result.generated_title,
            generated_content: result.generated_content,
            completed_at: Some(Utc::now()),
            ..Default::default()
        };
        self.store.update(history_id, &update).await?;
        self.status = HistoryStatus::Completed;

        Ok(())
    }

    /// Terminal failure: records an `error` entry, then marks the row failed.
    pub async fn complete_failure(
        &mut self,
        error_message: &str,
        error_data: Map<String, Value>,
    ) -> HistoryResult<()> {
        let history_id = self.ensure_open()?;

        if let Some(session) = self.session.as_mut() {
            let mut data = Map::new();
            data.insert("error".to_string(), json!(error_message));
            session.complete(SessionOutcome {
                success: false,
                data,
            });
        }

        let (input, output, context) = split_payload(error_data);
        if let Err(e) = self
            .record(LogType::Error, error_message, input, output, context)
            .await
        {
            warn!(
                "Failed to record failure log for history {}: {}",
                history_id, e
            );
        }

        let update = HistoryUpdate {
            status: Some(HistoryStatus::Failed),
            error_message: Some(error_message.to_string()),
            completed_at: Some(Utc::now()),
            ..Default::default()
        };
        self.store.update(history_id, &update).await?;
        self.status = HistoryStatus::Failed;

        Ok(())
    }
}

/// Pull `input` and `output` out of a caller map; the rest is context.
fn split_payload(
    mut data: Map<String, Value>,
) -> (Option<Value>, Option<Value>, Map<String, Value>) {
    let input = data.remove("input");
    let output = data.remove("output");
    (input, output, data)
}

fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// `(resident, peak)` bytes of the current process, when the platform
/// exposes them.
#[cfg(target_os = "linux")]
fn read_memory_usage() -> Option<(u64, u64)> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let field = |name: &str| {
        status
            .lines()
            .find_map(|line| line.strip_prefix(name))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| kb * 1024)
    };
    Some((field("VmRSS:")?, field("VmHWM:")?))
}

#[cfg(not(target_os = "linux"))]
fn read_memory_usage() -> Option<(u64, u64)> {
    None
}
