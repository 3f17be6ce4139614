use crate::error::ensure_range;
use crate::{ConfigError, ConfigErrorResult, DEFAULT_EXPORT_DIRECTORY};

use serde::Deserialize;

pub const MIN_MAX_AGE_SECS: u64 = 60;
pub const MAX_MAX_AGE_SECS: u64 = 30 * 24 * 3600;
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

pub const MIN_TEMPFILE_LOG_THRESHOLD: usize = 1;
pub const DEFAULT_TEMPFILE_LOG_THRESHOLD: usize = 200;

/// Session export settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Export directory; relative paths resolve against the config directory
    pub dir: String,
    /// Export files older than this are removed by cleanup
    pub max_age_secs: u64,
    /// Downloads of sessions with at least this many log entries go
    /// through a file in `dir`
    pub tempfile_log_threshold: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_EXPORT_DIRECTORY),
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            tempfile_log_threshold: DEFAULT_TEMPFILE_LOG_THRESHOLD,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::export("export.dir must not be empty"));
        }

        ensure_range(
            "export.max_age_secs",
            self.max_age_secs,
            MIN_MAX_AGE_SECS..=MAX_MAX_AGE_SECS,
        )?;

        if self.tempfile_log_threshold < MIN_TEMPFILE_LOG_THRESHOLD {
            return Err(ConfigError::export(format!(
                "export.tempfile_log_threshold must be >= {}, got {}",
                MIN_TEMPFILE_LOG_THRESHOLD, self.tempfile_log_threshold
            )));
        }

        Ok(())
    }
}
