use crate::{
    AiConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, ExportConfig, GenerationConfig, LoggingConfig, RetryConfig, ServerConfig,
    SiteConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub ai: AiConfig,
    pub retry: RetryConfig,
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. PS_CONFIG_DIR env var, else ./.postsmith/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: PS_CONFIG_DIR env var > ./.postsmith/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.ai.validate()?;
        self.retry.validate()?;
        self.generation.validate()?;
        self.export.validate()?;
        self.database.validate()
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Absolute export directory. Relative `export.dir` values resolve
    /// against the config directory.
    pub fn export_dir(&self) -> ConfigErrorResult<PathBuf> {
        let dir = Path::new(&self.export.dir);
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        Ok(Self::config_dir()?.join(dir))
    }

    pub fn bind_addr(&self) -> String {
        self.server.bind_addr()
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  site: {} ({})", self.site.name, self.site.url);
        info!(
            "  server: {} (max {} concurrent requests)",
            self.server.bind_addr(),
            self.server.max_concurrent_requests
        );
        info!("  database: {}", self.database.path);

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );

        info!(
            "  ai: model={}, max_tokens={}, temperature={}",
            self.ai.model().unwrap_or("default"),
            self.ai.max_tokens,
            self.ai.temperature
        );

        info!(
            "  retry: {} attempts={}, initial={}ms, max={}s, backoff={}x",
            if self.retry.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );

        info!(
            "  generation: default_status={}",
            self.generation.default_post_status
        );

        info!(
            "  export: dir={}, max_age={}s, tempfile_threshold={}",
            self.export.dir, self.export.max_age_secs, self.export.tempfile_log_threshold
        );
    }

    fn apply_env_overrides(&mut self) {
        // Site
        Self::apply_env_string("PS_SITE_NAME", &mut self.site.name);
        Self::apply_env_string("PS_SITE_DESCRIPTION", &mut self.site.description);
        Self::apply_env_string("PS_SITE_URL", &mut self.site.url);

        // Server
        Self::apply_env_string("PS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("PS_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "PS_SERVER_MAX_CONCURRENT_REQUESTS",
            &mut self.server.max_concurrent_requests,
        );

        // Database
        Self::apply_env_string("PS_DATABASE_PATH", &mut self.database.path);

        // Logging
        Self::apply_env_parse("PS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PS_LOG_FILE", &mut self.logging.file);

        // AI
        Self::apply_env_string("PS_AI_MODEL", &mut self.ai.model);
        Self::apply_env_parse("PS_AI_MAX_TOKENS", &mut self.ai.max_tokens);
        Self::apply_env_parse("PS_AI_TEMPERATURE", &mut self.ai.temperature);

        // Retry
        Self::apply_env_bool("PS_RETRY_ENABLED", &mut self.retry.enabled);
        Self::apply_env_parse("PS_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "PS_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("PS_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "PS_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("PS_RETRY_JITTER", &mut self.retry.jitter);

        // Generation
        Self::apply_env_string(
            "PS_GENERATION_DEFAULT_POST_STATUS",
            &mut self.generation.default_post_status,
        );
        Self::apply_env_option_parse(
            "PS_GENERATION_DEFAULT_POST_AUTHOR",
            &mut self.generation.default_post_author,
        );

        // Export
        Self::apply_env_string("PS_EXPORT_DIR", &mut self.export.dir);
        Self::apply_env_parse("PS_EXPORT_MAX_AGE_SECS", &mut self.export.max_age_secs);
        Self::apply_env_parse(
            "PS_EXPORT_TEMPFILE_LOG_THRESHOLD",
            &mut self.export.tempfile_log_threshold,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for optional parseable values
    fn apply_env_option_parse<T: std::str::FromStr>(var_name: &str, target: &mut Option<T>) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = Some(parsed);
        }
    }
}
