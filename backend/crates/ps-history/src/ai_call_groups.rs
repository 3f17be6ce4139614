//! Session view used by the admin API: AI request/response pairs grouped
//! by the component that issued them, plus the remaining diagnostic logs.

use crate::log_details::decode_details;

use ps_core::{HistoryLog, HistoryType};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const UNKNOWN_COMPONENT: &str = "unknown";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AiCallGroup {
    #[serde(rename = "type")]
    pub component: String,
    pub label: String,
    pub request: Option<Value>,
    pub response: Option<Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatLog {
    #[serde(rename = "type")]
    pub label: String,
    pub type_id: i64,
    pub timestamp: DateTime<Utc>,
    pub log_type: String,
    pub details: Value,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AiCallGroups {
    pub logs: Vec<FlatLog>,
    pub ai_calls: Vec<AiCallGroup>,
}

impl AiCallGroups {
    /// Groups keep the order in which each component first appears; a later
    /// request or response for the same component replaces the earlier one.
    /// Activity and session-metadata entries are left out.
    pub fn from_logs(logs: &[HistoryLog]) -> Self {
        let mut groups = Self::default();

        for log in logs {
            let details = decode_details(log);
            let history_type = HistoryType::from_id(log.history_type_id).unwrap_or(HistoryType::Log);

            match history_type {
                HistoryType::AiRequest | HistoryType::AiResponse => {
                    let component = details
                        .get("context")
                        .and_then(|c| c.get("component"))
                        .and_then(Value::as_str)
                        .unwrap_or(UNKNOWN_COMPONENT)
                        .to_string();

                    let group = groups.group_mut(&component);
                    if history_type == HistoryType::AiRequest {
                        group.request = Some(details);
                    } else {
                        group.response = Some(details);
                    }
                }
                HistoryType::Error
                | HistoryType::Warning
                | HistoryType::Log
                | HistoryType::Info
                | HistoryType::Debug => groups.logs.push(FlatLog {
                    label: history_type.label().to_string(),
                    type_id: history_type.id(),
                    timestamp: log.timestamp,
                    log_type: log.log_type.clone(),
                    details,
                }),
                HistoryType::Activity | HistoryType::SessionMetadata => {}
            }
        }

        groups
    }

    fn group_mut(&mut self, component: &str) -> &mut AiCallGroup {
        let index = match self.ai_calls.iter().position(|g| g.component == component) {
            Some(index) => index,
            None => {
                self.ai_calls.push(AiCallGroup {
                    component: component.to_string(),
                    label: component_label(component),
                    request: None,
                    response: None,
                });
                self.ai_calls.len() - 1
            }
        };
        &mut self.ai_calls[index]
    }
}

/// `"title_prompt"` becomes `"Title prompt"`.
pub fn component_label(component: &str) -> String {
    let spaced = component.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
