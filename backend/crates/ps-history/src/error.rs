use ps_core::CoreError;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History container is not persisted {location}")]
    NotPersisted { location: ErrorLocation },

    #[error("History container already completed with status {status} {location}")]
    AlreadyCompleted {
        status: String,
        location: ErrorLocation,
    },

    #[error("History store error: {source} {location}")]
    Store {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl HistoryError {
    #[track_caller]
    pub(crate) fn not_persisted() -> Self {
        Self::NotPersisted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn already_completed(status: impl Into<String>) -> Self {
        Self::AlreadyCompleted {
            status: status.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for HistoryError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type HistoryResult<T> = StdResult<T, HistoryError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("History item not found: {history_id} {location}")]
    NotFound {
        history_id: i64,
        location: ErrorLocation,
    },

    #[error("Failed to create export directory {path}: {source} {location}")]
    MkdirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to write export file {path}: {source} {location}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to encode session document: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("History store error: {source} {location}")]
    Store {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl ExportError {
    #[track_caller]
    pub(crate) fn not_found(history_id: i64) -> Self {
        Self::NotFound {
            history_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn mkdir(path: &Path, source: std::io::Error) -> Self {
        Self::MkdirFailed {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::MkdirFailed { .. } => "mkdir_failed",
            Self::WriteFailed { .. } => "write_failed",
            Self::Encode { .. } => "encode",
            Self::Store { .. } => "store",
        }
    }
}

impl From<serde_json::Error> for ExportError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for ExportError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ExportResult<T> = StdResult<T, ExportError>;
