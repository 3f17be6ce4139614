use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptSection {
    pub id: i64,
    pub name: String,
    pub section_key: String,
    pub content: String,
    pub is_active: bool,
}

impl PromptSection {
    pub fn new(id: i64, section_key: impl Into<String>, content: impl Into<String>) -> Self {
        let section_key = section_key.into();
        Self {
            id,
            name: section_key.clone(),
            section_key,
            content: content.into(),
            is_active: true,
        }
    }
}
