use serde::{Deserialize, Serialize};

/// Reusable tone/style override layered onto a template's prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Voice {
    pub id: i64,
    pub name: String,
    pub title_prompt: Option<String>,
    pub content_instructions: Option<String>,
    pub excerpt_instructions: Option<String>,
}

impl Voice {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn title_prompt(&self) -> Option<&str> {
        non_empty(self.title_prompt.as_deref())
    }

    pub fn content_instructions(&self) -> Option<&str> {
        non_empty(self.content_instructions.as_deref())
    }

    pub fn excerpt_instructions(&self) -> Option<&str> {
        non_empty(self.excerpt_instructions.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
