use serde::{Deserialize, Serialize};

/// Generation template: the base content prompt plus post settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: i64,
    pub name: String,

    pub prompt_template: String,
    pub title_prompt: Option<String>,
    pub image_prompt: Option<String>,

    pub voice_id: Option<i64>,
    pub article_structure_id: Option<i64>,

    pub post_status: String,
    pub post_category: Option<String>,
    pub post_tags: Option<String>,
    pub post_author: Option<i64>,
    pub post_quantity: i32,

    pub generate_featured_image: bool,
    pub is_active: bool,
}

impl Template {
    pub fn new(id: i64, name: impl Into<String>, prompt_template: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prompt_template: prompt_template.into(),
            post_status: String::from("draft"),
            post_quantity: 1,
            is_active: true,
            ..Default::default()
        }
    }
}
