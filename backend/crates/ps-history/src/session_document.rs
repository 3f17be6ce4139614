use ps_core::{GeneratedPost, HistoryStatus, HistoryType};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Self-contained export of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDocument {
    pub metadata: ExportMetadata,
    pub post_id: Option<i64>,
    pub post: Option<GeneratedPost>,
    pub history: HistorySummary,
    pub history_containers: Vec<ContainerDocument>,
}

impl SessionDocument {
    pub fn log_count(&self) -> usize {
        self.history_containers.iter().map(|c| c.logs.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportMetadata {
    pub generated_at: String,
    pub generated_by: String,
    pub version: String,
    pub site_name: String,
    pub site_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySummary {
    pub id: i64,
    pub uuid: String,
    pub post_id: Option<i64>,
    pub template_id: Option<i64>,
    pub status: HistoryStatus,
    pub prompt: Option<String>,
    pub generated_title: Option<String>,
    pub generated_content: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerDocument {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: HistoryStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub metadata: ContainerMetadata,
    pub logs: Vec<LogDocument>,
    pub statistics: ContainerStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainerMetadata {
    pub template_id: Option<i64>,
    pub post_id: Option<i64>,
    pub author_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub creation_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogDocument {
    pub id: i64,
    pub log_type: String,
    pub history_type_id: i64,
    pub history_type_label: String,
    pub timestamp: DateTime<Utc>,
    pub details: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContainerStatistics {
    pub total_logs: usize,
    /// Entry count per history type id.
    pub log_types: BTreeMap<i64, usize>,
    pub errors: usize,
    pub warnings: usize,
    pub ai_requests: usize,
    pub ai_responses: usize,
}

impl ContainerStatistics {
    pub fn from_logs(logs: &[LogDocument]) -> Self {
        let mut stats = Self {
            total_logs: logs.len(),
            ..Default::default()
        };

        for log in logs {
            *stats.log_types.entry(log.history_type_id).or_default() += 1;

            match HistoryType::from_id(log.history_type_id) {
                Some(HistoryType::Error) => stats.errors += 1,
                Some(HistoryType::Warning) => stats.warnings += 1,
                Some(HistoryType::AiRequest) => stats.ai_requests += 1,
                Some(HistoryType::AiResponse) => stats.ai_responses += 1,
                _ => {}
            }
        }

        stats
    }
}
