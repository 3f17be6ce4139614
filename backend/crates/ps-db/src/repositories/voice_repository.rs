use crate::Result as DbErrorResult;

use ps_core::Voice;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct VoiceRepository {
    pool: SqlitePool,
}

impl VoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, voice: &Voice) -> DbErrorResult<i64> {
        let result = sqlx::query(
            r#"
              INSERT INTO ps_voices (name, title_prompt, content_instructions, excerpt_instructions)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(&voice.name)
        .bind(&voice.title_prompt)
        .bind(&voice.content_instructions)
        .bind(&voice.excerpt_instructions)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Voice>> {
        let row = sqlx::query(
            r#"
              SELECT id, name, title_prompt, content_instructions, excerpt_instructions
              FROM ps_voices
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_voice).transpose()
    }
}

fn row_to_voice(row: &SqliteRow) -> DbErrorResult<Voice> {
    Ok(Voice {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        title_prompt: row.try_get("title_prompt")?,
        content_instructions: row.try_get("content_instructions")?,
        excerpt_instructions: row.try_get("excerpt_instructions")?,
    })
}
