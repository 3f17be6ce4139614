use serde::Serialize;

/// Response for DELETE operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}
