use crate::Result as DbErrorResult;

use ps_core::Template;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TEMPLATE_COLUMNS: &str = "id, name, prompt_template, title_prompt, image_prompt, voice_id, \
     article_structure_id, post_status, post_category, post_tags, post_author, post_quantity, \
     generate_featured_image, is_active";

pub struct TemplateRepository {
    pool: SqlitePool,
}

impl TemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a template; the `id` field of the argument is ignored.
    pub async fn create(&self, template: &Template) -> DbErrorResult<i64> {
        let result = sqlx::query(
            r#"
              INSERT INTO ps_templates (
                  name, prompt_template, title_prompt, image_prompt,
                  voice_id, article_structure_id,
                  post_status, post_category, post_tags, post_author, post_quantity,
                  generate_featured_image, is_active
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&template.name)
        .bind(&template.prompt_template)
        .bind(&template.title_prompt)
        .bind(&template.image_prompt)
        .bind(template.voice_id)
        .bind(template.article_structure_id)
        .bind(&template.post_status)
        .bind(&template.post_category)
        .bind(&template.post_tags)
        .bind(template.post_author)
        .bind(template.post_quantity)
        .bind(template.generate_featured_image)
        .bind(template.is_active)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Template>> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM ps_templates WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_template).transpose()
    }

    pub async fn list_active(&self) -> DbErrorResult<Vec<Template>> {
        let sql =
            format!("SELECT {TEMPLATE_COLUMNS} FROM ps_templates WHERE is_active = 1 ORDER BY name");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_template).collect()
    }
}

fn row_to_template(row: &SqliteRow) -> DbErrorResult<Template> {
    Ok(Template {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        prompt_template: row.try_get("prompt_template")?,
        title_prompt: row.try_get("title_prompt")?,
        image_prompt: row.try_get("image_prompt")?,
        voice_id: row.try_get("voice_id")?,
        article_structure_id: row.try_get("article_structure_id")?,
        post_status: row.try_get("post_status")?,
        post_category: row.try_get("post_category")?,
        post_tags: row.try_get("post_tags")?,
        post_author: row.try_get("post_author")?,
        post_quantity: row.try_get("post_quantity")?,
        generate_featured_image: row.try_get("generate_featured_image")?,
        is_active: row.try_get("is_active")?,
    })
}
