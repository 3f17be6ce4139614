use crate::ConfigErrorResult;
use crate::error::ensure_range;

use serde::Deserialize;

pub const MIN_MAX_TOKENS: u32 = 1;
pub const MAX_MAX_TOKENS: u32 = 200_000;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Defaults for calls to the AI backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Empty means "backend default"
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_range("ai.max_tokens", self.max_tokens, MIN_MAX_TOKENS..=MAX_MAX_TOKENS)?;
        ensure_range("ai.temperature", self.temperature, MIN_TEMPERATURE..=MAX_TEMPERATURE)
    }

    pub fn model(&self) -> Option<&str> {
        Some(self.model.as_str()).filter(|m| !m.is_empty())
    }
}
