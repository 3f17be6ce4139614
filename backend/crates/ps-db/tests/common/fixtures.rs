use ps_core::{HistoryMetadata, NewHistory, NewPost, Template};

use uuid::Uuid;

pub fn new_history(template_id: i64) -> NewHistory {
    NewHistory::new(
        Uuid::new_v4().to_string(),
        "post_generation",
        HistoryMetadata::default()
            .with_template(template_id)
            .with_author(1)
            .with_creation_method("scheduled")
            .with_prompt("Write about {{topic}}"),
    )
}

pub fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "<p>Body</p>".to_string(),
        excerpt: "Short".to_string(),
        status: "draft".to_string(),
        author_id: Some(1),
        template_id: Some(3),
        ..Default::default()
    }
}

pub fn template(name: &str) -> Template {
    let mut template = Template::new(0, name, "Write a post about {{topic}}");
    template.title_prompt = Some("Catchy title for {{topic}}".to_string());
    template
}
