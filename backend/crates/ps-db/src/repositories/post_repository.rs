use crate::Result as DbErrorResult;
use crate::repositories::from_unix;

use ps_core::{GeneratedPost, NewPost, PostStore, Result as CoreErrorResult};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TABLE: &str = "ps_posts";

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, post: &NewPost) -> DbErrorResult<i64> {
        let result = sqlx::query(
            r#"
              INSERT INTO ps_posts (
                  title, content, excerpt, status, author_id,
                  category, tags, template_id, featured_image, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.status)
        .bind(post.author_id)
        .bind(&post.category)
        .bind(&post.tags)
        .bind(post.template_id)
        .bind(&post.featured_image)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<GeneratedPost>> {
        let row = sqlx::query(
            r#"
              SELECT id, title, content, excerpt, status, author_id,
                     category, tags, template_id, featured_image, created_at
              FROM ps_posts
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_post).transpose()
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn create_post(&self, post: &NewPost) -> CoreErrorResult<i64> {
        Ok(self.insert(post).await?)
    }

    async fn get_post(&self, id: i64) -> CoreErrorResult<Option<GeneratedPost>> {
        Ok(self.find_by_id(id).await?)
    }
}

fn row_to_post(row: &SqliteRow) -> DbErrorResult<GeneratedPost> {
    Ok(GeneratedPost {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        excerpt: row.try_get("excerpt")?,
        status: row.try_get("status")?,
        author_id: row.try_get("author_id")?,
        category: row.try_get("category")?,
        tags: row.try_get("tags")?,
        template_id: row.try_get("template_id")?,
        featured_image: row.try_get("featured_image")?,
        created_at: from_unix(TABLE, row.try_get("created_at")?)?,
    })
}
