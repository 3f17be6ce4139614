use crate::Result as DbErrorResult;

use ps_core::ArticleStructure;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct ArticleStructureRepository {
    pool: SqlitePool,
}

impl ArticleStructureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, structure: &ArticleStructure) -> DbErrorResult<i64> {
        let result = sqlx::query(
            r#"
              INSERT INTO ps_article_structures (
                  name, description, structure_data, is_active, is_default
              ) VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(&structure.name)
        .bind(&structure.description)
        .bind(&structure.structure_data)
        .bind(structure.is_active)
        .bind(structure.is_default)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_all(&self) -> DbErrorResult<Vec<ArticleStructure>> {
        let rows = sqlx::query(
            r#"
              SELECT id, name, description, structure_data, is_active, is_default
              FROM ps_article_structures
              ORDER BY id
              "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_structure).collect()
    }
}

fn row_to_structure(row: &SqliteRow) -> DbErrorResult<ArticleStructure> {
    Ok(ArticleStructure {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        structure_data: row.try_get("structure_data")?,
        is_active: row.try_get("is_active")?,
        is_default: row.try_get("is_default")?,
    })
}
