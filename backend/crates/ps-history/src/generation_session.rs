use ps_core::{DETAIL_TIMESTAMP_FORMAT, Template, Voice};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Template settings captured when a session starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateSnapshot {
    pub id: Option<i64>,
    pub name: String,
    pub prompt_template: String,
    pub title_prompt: Option<String>,
    pub image_prompt: Option<String>,
    pub post_status: String,
    pub post_category: Option<String>,
    pub post_tags: Option<String>,
    pub post_author: Option<i64>,
    pub post_quantity: i32,
    pub generate_featured_image: bool,
}

impl From<&Template> for TemplateSnapshot {
    fn from(template: &Template) -> Self {
        Self {
            id: Some(template.id),
            name: template.name.clone(),
            prompt_template: template.prompt_template.clone(),
            title_prompt: template.title_prompt.clone(),
            image_prompt: template.image_prompt.clone(),
            post_status: template.post_status.clone(),
            post_category: template.post_category.clone(),
            post_tags: template.post_tags.clone(),
            post_author: template.post_author,
            post_quantity: template.post_quantity,
            generate_featured_image: template.generate_featured_image,
        }
    }
}

/// Completion payload: `success` plus whatever the caller reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionOutcome {
    pub success: bool,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// In-memory tracker attached to a container for external reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSession {
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    template: TemplateSnapshot,
    voice: Option<Voice>,
    ai_call_count: usize,
    error_count: usize,
    result: Option<SessionOutcome>,
}

impl GenerationSession {
    pub fn start(template: TemplateSnapshot, voice: Option<Voice>) -> Self {
        Self {
            started_at: Utc::now(),
            completed_at: None,
            template,
            voice,
            ai_call_count: 0,
            error_count: 0,
            result: None,
        }
    }

    pub(crate) fn log_ai_call(&mut self) {
        self.ai_call_count += 1;
    }

    pub(crate) fn add_error(&mut self) {
        self.error_count += 1;
    }

    pub(crate) fn complete(&mut self, outcome: SessionOutcome) {
        self.completed_at = Some(Utc::now());
        self.result = Some(outcome);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn template(&self) -> &TemplateSnapshot {
        &self.template
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn ai_call_count(&self) -> usize {
        self.ai_call_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn result(&self) -> Option<&SessionOutcome> {
        self.result.as_ref()
    }

    pub fn was_successful(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.success)
    }

    /// Whole seconds between start and completion.
    pub fn duration_secs(&self) -> Option<i64> {
        self.completed_at
            .map(|done| (done - self.started_at).num_seconds())
    }

    /// Serializable summary for `session_metadata` log entries.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "started_at": self.started_at.format(DETAIL_TIMESTAMP_FORMAT).to_string(),
            "completed_at": self
                .completed_at
                .map(|t| t.format(DETAIL_TIMESTAMP_FORMAT).to_string()),
            "template": self.template,
            "voice": self.voice,
            "ai_call_count": self.ai_call_count,
            "error_count": self.error_count,
            "result": self.result,
        })
    }
}
