use crate::{ConfigError, ConfigErrorResult, DEFAULT_POST_STATUS};

use serde::Deserialize;

pub const ALLOWED_POST_STATUSES: [&str; 3] = ["draft", "pending", "publish"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Used when a template leaves post_status empty
    pub default_post_status: String,
    pub default_post_author: Option<i64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_post_status: String::from(DEFAULT_POST_STATUS),
            default_post_author: None,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !ALLOWED_POST_STATUSES.contains(&self.default_post_status.as_str()) {
            return Err(ConfigError::config(format!(
                "generation.default_post_status must be one of {:?}, got {}",
                ALLOWED_POST_STATUSES, self.default_post_status
            )));
        }

        Ok(())
    }
}
