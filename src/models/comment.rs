use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::pagination::{PaginationParams, SortParams};

/// A comment on a task, as returned by the service and the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier for the comment (UUID v4).
    pub id: Uuid,
    /// The task the comment is attached to.
    pub task_id: Uuid,
    /// The account that wrote, and owns, the comment.
    pub account_id: Uuid,
    /// Comment text. Never empty.
    pub content: String,
    /// Timestamp of when the comment was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update, `None` until the comment is edited.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Storage representation of a comment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub task_id: Uuid,
    pub account_id: Uuid,
    pub content: String,
    /// Inactive records are invisible to every read. Nothing in the service
    /// clears this flag; deletes remove the record.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CommentRecord {
    /// Builds a fresh, active record for a new comment.
    pub fn new(task_id: Uuid, account_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            account_id,
            content,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Whether this record is the visible comment addressed by `key`.
    pub fn matches(&self, key: &CommentKey) -> bool {
        self.active
            && self.id == key.comment_id
            && self.task_id == key.task_id
            && self.account_id == key.account_id
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            task_id: record.task_id,
            account_id: record.account_id,
            content: record.content,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// The triple that addresses a single comment on behalf of an account.
///
/// Lookups only succeed when all three parts match, which is what keeps one
/// account's comments invisible to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentKey {
    pub task_id: Uuid,
    pub comment_id: Uuid,
    pub account_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateCommentParams {
    pub task_id: Uuid,
    pub account_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCommentParams {
    pub task_id: Uuid,
    pub comment_id: Uuid,
    pub account_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPaginatedCommentsParams {
    pub task_id: Uuid,
    pub account_id: Uuid,
    pub pagination_params: PaginationParams,
    pub sort_params: Option<SortParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UpdateCommentParams {
    pub task_id: Uuid,
    pub comment_id: Uuid,
    pub account_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommentParams {
    pub task_id: Uuid,
    pub comment_id: Uuid,
    pub account_id: Uuid,
}

macro_rules! impl_comment_key {
    ($($params:ty),+) => {
        $(
            impl $params {
                pub fn key(&self) -> CommentKey {
                    CommentKey {
                        task_id: self.task_id,
                        comment_id: self.comment_id,
                        account_id: self.account_id,
                    }
                }
            }
        )+
    };
}

impl_comment_key!(GetCommentParams, UpdateCommentParams, DeleteCommentParams);

/// Receipt returned after a comment has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDeletionResult {
    pub comment_id: Uuid,
    pub deleted_at: DateTime<Utc>,
    pub success: bool,
}
