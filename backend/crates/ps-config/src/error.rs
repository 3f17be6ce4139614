use std::fmt::Display;
use std::ops::RangeInclusive;
use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("{key} must be {min}-{max}, got {value} {location}")]
    OutOfRange {
        key: &'static str,
        value: String,
        min: String,
        max: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Config",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a database error
    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Database",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an export error
    #[track_caller]
    pub fn export<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Export",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a serde error
    #[track_caller]
    pub fn serde<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Serde",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Reject `value` unless it lies within `range` (inclusive).
#[track_caller]
pub(crate) fn ensure_range<T>(
    key: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> ConfigErrorResult<()>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        return Ok(());
    }

    Err(ConfigError::OutOfRange {
        key,
        value: value.to_string(),
        min: range.start().to_string(),
        max: range.end().to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

impl serde::de::Error for ConfigError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConfigError::serde(msg.to_string())
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
