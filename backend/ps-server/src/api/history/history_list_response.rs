use crate::HistoryDto;

use ps_db::HistoryPage;

use serde::Serialize;

/// One page of history rows
#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryDto>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

impl From<HistoryPage> for HistoryListResponse {
    fn from(page: HistoryPage) -> Self {
        Self {
            items: page.items.into_iter().map(HistoryDto::from).collect(),
            total: page.total,
            pages: page.pages,
            current_page: page.current_page,
        }
    }
}
