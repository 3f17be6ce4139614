use crate::error::ensure_range;
use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
/// Lowest non-privileged port; 0 asks the OS for one.
pub const MIN_PORT: u16 = 1024;

pub const MAX_CONCURRENT_REQUESTS_RANGE: (usize, usize) = (1, 10_000);
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

/// Admin REST listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests handled at once; further requests wait for a slot
    pub max_concurrent_requests: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::config("server.host must not be empty"));
        }

        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        let (min, max) = MAX_CONCURRENT_REQUESTS_RANGE;
        ensure_range(
            "server.max_concurrent_requests",
            self.max_concurrent_requests,
            min..=max,
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
