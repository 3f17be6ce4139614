pub mod delete_response;
pub mod error;
pub mod exports;
pub mod history;
pub mod sessions;
pub mod templates;

use crate::ApiError;

/// History ids are positive; 0 is what a missing or unparsable id decays to.
#[track_caller]
pub(crate) fn ensure_history_id(id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation("Invalid history ID", Some("id")));
    }
    Ok(id)
}
