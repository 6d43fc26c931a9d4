//! Persistence seam for comments.
//!
//! The repository is plain storage: it knows how to find, count and mutate
//! records matching a key, and nothing about who is allowed to do so. Scoping by
//! task and account happens in the reader and writer that sit on top of it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CommentKey, CommentRecord, SortParams};

/// A bounded listing of the active comments one account left on one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPageQuery {
    pub task_id: Uuid,
    pub account_id: Uuid,
    pub sort: SortParams,
    pub offset: u64,
    pub limit: u32,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new record and returns it as persisted.
    async fn create(&self, record: CommentRecord) -> Result<CommentRecord, AppError>;

    /// Finds the active record matching every part of `key`.
    async fn find_one(&self, key: &CommentKey) -> Result<Option<CommentRecord>, AppError>;

    /// Returns one page of records, ordered by `query.sort` and then by insertion order.
    async fn find_page(&self, query: &CommentPageQuery) -> Result<Vec<CommentRecord>, AppError>;

    /// Counts the active records on a task owned by an account.
    async fn count(&self, task_id: Uuid, account_id: Uuid) -> Result<u64, AppError>;

    /// Replaces the content of the record matching `key`.
    ///
    /// Returns `None` when nothing matched.
    async fn update_content(
        &self,
        key: &CommentKey,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CommentRecord>, AppError>;

    /// Removes the record matching `key`. Returns whether a record was removed.
    async fn delete(&self, key: &CommentKey) -> Result<bool, AppError>;
}
