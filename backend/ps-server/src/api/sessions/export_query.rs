use serde::Deserialize;

/// Query parameters for the session export
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub pretty: Option<bool>,
}
