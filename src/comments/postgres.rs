use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{CommentPageQuery, CommentRepository};
use crate::error::AppError;
use crate::models::{CommentKey, CommentRecord, SortField};

const COMMENT_COLUMNS: &str =
    "id, task_id, account_id, content, active, created_at, updated_at";

/// Comment store backed by the `comments` table.
#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_by_clause(query: &CommentPageQuery) -> String {
    let column = match query.sort.sort_by {
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "COALESCE(updated_at, created_at)",
    };
    let direction = query.sort.sort_direction.keyword();
    // `seq` preserves insertion order among equal timestamps.
    format!("ORDER BY {column} {direction}, seq {direction}")
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, record: CommentRecord) -> Result<CommentRecord, AppError> {
        let sql = format!(
            "INSERT INTO comments (id, task_id, account_id, content, active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COMMENT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, CommentRecord>(&sql)
            .bind(record.id)
            .bind(record.task_id)
            .bind(record.account_id)
            .bind(&record.content)
            .bind(record.active)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_one(&self, key: &CommentKey) -> Result<Option<CommentRecord>, AppError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE id = $1 AND task_id = $2 AND account_id = $3 AND active"
        );
        let record = sqlx::query_as::<_, CommentRecord>(&sql)
            .bind(key.comment_id)
            .bind(key.task_id)
            .bind(key.account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn find_page(&self, query: &CommentPageQuery) -> Result<Vec<CommentRecord>, AppError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE task_id = $1 AND account_id = $2 AND active
             {}
             LIMIT $3 OFFSET $4",
            order_by_clause(query)
        );
        let offset = i64::try_from(query.offset)
            .map_err(|_| AppError::BadRequest("page is out of range".into()))?;
        let records = sqlx::query_as::<_, CommentRecord>(&sql)
            .bind(query.task_id)
            .bind(query.account_id)
            .bind(i64::from(query.limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn count(&self, task_id: Uuid, account_id: Uuid) -> Result<u64, AppError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM comments WHERE task_id = $1 AND account_id = $2 AND active",
        )
        .bind(task_id)
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn update_content(
        &self,
        key: &CommentKey,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CommentRecord>, AppError> {
        let sql = format!(
            "UPDATE comments SET content = $1, updated_at = $2
             WHERE id = $3 AND task_id = $4 AND account_id = $5 AND active
             RETURNING {COMMENT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, CommentRecord>(&sql)
            .bind(content)
            .bind(updated_at)
            .bind(key.comment_id)
            .bind(key.task_id)
            .bind(key.account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn delete(&self, key: &CommentKey) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM comments WHERE id = $1 AND task_id = $2 AND account_id = $3 AND active",
        )
        .bind(key.comment_id)
        .bind(key.task_id)
        .bind(key.account_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
