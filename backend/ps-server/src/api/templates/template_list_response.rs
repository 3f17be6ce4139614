use crate::TemplateDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateDto>,
}
