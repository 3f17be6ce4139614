use crate::ApiError;

use ps_core::HistoryStatus;
use ps_db::HistoryQuery;

use std::str::FromStr;

use serde::Deserialize;

/// Query parameters for GET /api/v1/generated-posts
#[derive(Debug, Default, Deserialize)]
pub struct HistoryListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub template_id: Option<i64>,
    pub search: Option<String>,
}

impl TryFrom<HistoryListQuery> for HistoryQuery {
    type Error = ApiError;

    #[track_caller]
    fn try_from(query: HistoryListQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(HistoryStatus::from_str(raw).map_err(|_| {
                ApiError::validation(format!("Unknown status '{}'", raw), Some("status"))
            })?),
            None => None,
        };

        Ok(HistoryQuery {
            page: query.page.unwrap_or(1),
            per_page: query.per_page.unwrap_or_default(),
            status,
            template_id: query.template_id,
            search: query.search,
        })
    }
}
