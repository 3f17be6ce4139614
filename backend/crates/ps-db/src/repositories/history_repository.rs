//! SQLite persistence for history containers and their log entries.
//!
//! Log entries are append-only. Reads return them ordered by
//! `(timestamp, id)` so entries written within the same second keep their
//! insertion order.

use crate::repositories::from_unix;
use crate::{DbError, Result as DbErrorResult};

use ps_core::{
    HistoryLog, HistoryRecord, HistoryStatus, HistoryStore, HistoryType, HistoryUpdate,
    NewHistory, Result as CoreErrorResult,
};

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

const TABLE: &str = "ps_history";
const LOG_TABLE: &str = "ps_history_log";

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

const HISTORY_COLUMNS: &str = "id, uuid, kind, post_id, template_id, author_id, topic_id, \
     creation_method, status, prompt, generated_title, generated_content, error_message, \
     created_at, completed_at";

/// Filters for the paginated history listing.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub page: i64,
    pub per_page: i64,
    pub status: Option<HistoryStatus>,
    pub template_id: Option<i64>,
    /// Substring match on the generated title
    pub search: Option<String>,
}

impl HistoryQuery {
    fn per_page(&self) -> i64 {
        match self.per_page {
            n if n < 1 => DEFAULT_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        }
    }

    fn page(&self) -> i64 {
        self.page.max(1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryRecord>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

#[derive(Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, history: &NewHistory) -> DbErrorResult<i64> {
        let meta = &history.metadata;
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
              INSERT INTO ps_history (
                  uuid, kind, post_id, template_id, author_id, topic_id,
                  creation_method, status, prompt, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&history.uuid)
        .bind(&history.kind)
        .bind(meta.post_id)
        .bind(meta.template_id)
        .bind(meta.author_id)
        .bind(meta.topic_id)
        .bind(&meta.creation_method)
        .bind(history.status.as_str())
        .bind(&meta.prompt)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<HistoryRecord>> {
        let sql = format!("SELECT {HISTORY_COLUMNS} FROM ps_history WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut record = row_to_history(&row)?;
        record.logs = self.find_logs(id).await?;
        Ok(Some(record))
    }

    pub async fn find_logs(&self, history_id: i64) -> DbErrorResult<Vec<HistoryLog>> {
        let rows = sqlx::query(
            r#"
              SELECT id, history_id, log_type, history_type_id, timestamp, details
              FROM ps_history_log
              WHERE history_id = ?
              ORDER BY timestamp ASC, id ASC
              "#,
        )
        .bind(history_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_log).collect()
    }

    /// Fails with [`DbError::NotFound`] when no row has this id.
    pub async fn apply_update(&self, id: i64, update: &HistoryUpdate) -> DbErrorResult<()> {
        if update.is_empty() {
            let exists = sqlx::query("SELECT 1 FROM ps_history WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            return match exists {
                Some(_) => Ok(()),
                None => Err(DbError::not_found(TABLE, id)),
            };
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE ps_history SET ");
        let mut fields = builder.separated(", ");

        if let Some(status) = update.status {
            fields.push("status = ").push_bind_unseparated(status.as_str());
        }
        if let Some(post_id) = update.post_id {
            fields.push("post_id = ").push_bind_unseparated(post_id);
        }
        if let Some(title) = &update.generated_title {
            fields.push("generated_title = ").push_bind_unseparated(title.clone());
        }
        if let Some(content) = &update.generated_content {
            fields.push("generated_content = ").push_bind_unseparated(content.clone());
        }
        if let Some(message) = &update.error_message {
            fields.push("error_message = ").push_bind_unseparated(message.clone());
        }
        if let Some(completed_at) = update.completed_at {
            fields
                .push("completed_at = ")
                .push_bind_unseparated(completed_at.timestamp());
        }

        builder.push(" WHERE id = ").push_bind(id);
        let result = builder.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(TABLE, id));
        }

        Ok(())
    }

    pub async fn insert_log(
        &self,
        history_id: i64,
        log_type: &str,
        details: &serde_json::Value,
        history_type: HistoryType,
    ) -> DbErrorResult<i64> {
        let details = serde_json::to_string(details)
            .map_err(|e| DbError::decode(LOG_TABLE, e.to_string()))?;
        let timestamp = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
              INSERT INTO ps_history_log (history_id, log_type, history_type_id, timestamp, details)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(history_id)
        .bind(log_type)
        .bind(history_type.id())
        .bind(timestamp)
        .bind(details)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Paginated listing, newest first. Items carry no log entries.
    pub async fn list(&self, query: &HistoryQuery) -> DbErrorResult<HistoryPage> {
        let per_page = query.per_page();
        let page = query.page();

        let mut count: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM ps_history");
        push_filters(&mut count, query);
        let total: i64 = count
            .build()
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        let mut select: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {HISTORY_COLUMNS} FROM ps_history"));
        push_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind((page - 1) * per_page);

        let rows = select.build().fetch_all(&self.pool).await?;
        let items = rows
            .iter()
            .map(row_to_history)
            .collect::<DbErrorResult<Vec<_>>>()?;

        Ok(HistoryPage {
            items,
            total,
            pages: (total + per_page - 1) / per_page,
            current_page: page,
        })
    }

    /// Delete a history row and its log entries. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM ps_history_log WHERE history_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM ps_history WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl HistoryStore for HistoryRepository {
    async fn create(&self, history: &NewHistory) -> CoreErrorResult<i64> {
        Ok(self.insert(history).await?)
    }

    async fn get_by_id(&self, id: i64) -> CoreErrorResult<Option<HistoryRecord>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn update(&self, id: i64, update: &HistoryUpdate) -> CoreErrorResult<()> {
        Ok(self.apply_update(id, update).await?)
    }

    async fn add_log_entry(
        &self,
        history_id: i64,
        log_type: &str,
        details: &serde_json::Value,
        history_type: HistoryType,
    ) -> CoreErrorResult<i64> {
        Ok(self
            .insert_log(history_id, log_type, details, history_type)
            .await?)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &HistoryQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(template_id) = query.template_id {
        builder.push(" AND template_id = ").push_bind(template_id);
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(" AND generated_title LIKE ")
            .push_bind(format!("%{search}%"));
    }
}

fn row_to_history(row: &SqliteRow) -> DbErrorResult<HistoryRecord> {
    let status: String = row.try_get("status")?;
    let status =
        HistoryStatus::from_str(&status).map_err(|e| DbError::decode(TABLE, e.to_string()))?;

    let completed_at = row
        .try_get::<Option<i64>, _>("completed_at")?
        .map(|secs| from_unix(TABLE, secs))
        .transpose()?;

    Ok(HistoryRecord {
        id: row.try_get("id")?,
        uuid: row.try_get("uuid")?,
        kind: row.try_get("kind")?,
        post_id: row.try_get("post_id")?,
        template_id: row.try_get("template_id")?,
        author_id: row.try_get("author_id")?,
        topic_id: row.try_get("topic_id")?,
        creation_method: row.try_get("creation_method")?,
        status,
        prompt: row.try_get("prompt")?,
        generated_title: row.try_get("generated_title")?,
        generated_content: row.try_get("generated_content")?,
        error_message: row.try_get("error_message")?,
        created_at: from_unix(TABLE, row.try_get("created_at")?)?,
        completed_at,
        logs: Vec::new(),
    })
}

fn row_to_log(row: &SqliteRow) -> DbErrorResult<HistoryLog> {
    Ok(HistoryLog {
        id: row.try_get("id")?,
        history_id: row.try_get("history_id")?,
        log_type: row.try_get("log_type")?,
        history_type_id: row.try_get("history_type_id")?,
        timestamp: from_unix(LOG_TABLE, row.try_get("timestamp")?)?,
        details: row.try_get("details")?,
    })
}
