use crate::Result as DbErrorResult;

use ps_core::PromptSection;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct PromptSectionRepository {
    pool: SqlitePool,
}

impl PromptSectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, section: &PromptSection) -> DbErrorResult<i64> {
        let result = sqlx::query(
            r#"
              INSERT INTO ps_prompt_sections (name, section_key, content, is_active)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(&section.name)
        .bind(&section.section_key)
        .bind(&section.content)
        .bind(section.is_active)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All sections, active or not; callers decide how to treat inactive ones.
    pub async fn list_all(&self) -> DbErrorResult<Vec<PromptSection>> {
        let rows = sqlx::query(
            r#"
              SELECT id, name, section_key, content, is_active
              FROM ps_prompt_sections
              ORDER BY section_key
              "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_section).collect()
    }
}

fn row_to_section(row: &SqliteRow) -> DbErrorResult<PromptSection> {
    Ok(PromptSection {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        section_key: row.try_get("section_key")?,
        content: row.try_get("content")?,
        is_active: row.try_get("is_active")?,
    })
}
