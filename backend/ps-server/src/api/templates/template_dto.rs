use ps_core::Template;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateDto {
    pub id: i64,
    pub name: String,
    pub voice_id: Option<i64>,
    pub article_structure_id: Option<i64>,
    pub post_status: String,
    pub post_category: Option<String>,
    pub post_author: Option<i64>,
    pub post_quantity: i32,
    pub has_title_prompt: bool,
}

impl From<Template> for TemplateDto {
    fn from(template: Template) -> Self {
        Self {
            has_title_prompt: template
                .title_prompt
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
            id: template.id,
            name: template.name,
            voice_id: template.voice_id,
            article_structure_id: template.article_structure_id,
            post_status: template.post_status,
            post_category: template.post_category,
            post_author: template.post_author,
            post_quantity: template.post_quantity,
        }
    }
}
