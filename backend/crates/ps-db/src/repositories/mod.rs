pub mod article_structure_repository;
pub mod history_repository;
pub mod post_repository;
pub mod prompt_section_repository;
pub mod template_repository;
pub mod voice_repository;

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};

/// Stored timestamps are unix seconds.
#[track_caller]
pub(crate) fn from_unix(table: &'static str, secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(table, format!("timestamp out of range: {secs}")))
}
