mod ai_config;
mod config;
mod database_config;
mod error;
mod export_config;
mod generation_config;
mod log_level;
mod logging_config;
mod retry_config;
mod server_config;
mod site_config;

#[cfg(test)]
mod tests;

pub use ai_config::AiConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use export_config::ExportConfig;
pub use generation_config::GenerationConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use site_config::SiteConfig;

const CONFIG_DIR_ENV: &str = "PS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".postsmith";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "postsmith.db";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

const DEFAULT_SITE_NAME: &str = "Postsmith";
const DEFAULT_SITE_URL: &str = "http://localhost:8000";

const DEFAULT_POST_STATUS: &str = "draft";
const DEFAULT_EXPORT_DIRECTORY: &str = "exports";
