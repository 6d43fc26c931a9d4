use std::sync::Arc;

use chrono::Utc;

use super::repository::CommentRepository;
use crate::error::AppError;
use crate::models::{
    Comment, CommentDeletionResult, CommentRecord, CreateCommentParams, DeleteCommentParams,
    UpdateCommentParams,
};

/// Write side of the comment module. Each call performs at most one mutation.
///
/// Callers are expected to have validated content already; see `CommentService`.
#[derive(Clone)]
pub(crate) struct CommentWriter {
    repository: Arc<dyn CommentRepository>,
}

impl CommentWriter {
    pub(crate) fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    pub(crate) async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<Comment, AppError> {
        let record = CommentRecord::new(params.task_id, params.account_id, params.content);
        let created = self.repository.create(record).await?;

        log::info!(
            "comment {} created on task {} by account {}",
            created.id,
            created.task_id,
            created.account_id
        );
        Ok(created.into())
    }

    pub(crate) async fn update_comment(
        &self,
        params: UpdateCommentParams,
    ) -> Result<Comment, AppError> {
        let updated = self
            .repository
            .update_content(&params.key(), &params.content, Utc::now())
            .await?
            .ok_or_else(|| AppError::comment_not_found(params.comment_id))?;

        log::info!("comment {} updated", updated.id);
        Ok(updated.into())
    }

    pub(crate) async fn delete_comment(
        &self,
        params: DeleteCommentParams,
    ) -> Result<CommentDeletionResult, AppError> {
        if !self.repository.delete(&params.key()).await? {
            return Err(AppError::comment_not_found(params.comment_id));
        }

        log::info!("comment {} deleted", params.comment_id);
        Ok(CommentDeletionResult {
            comment_id: params.comment_id,
            deleted_at: Utc::now(),
            success: true,
        })
    }
}
