use std::sync::Arc;

use super::repository::{CommentPageQuery, CommentRepository};
use crate::error::AppError;
use crate::models::{Comment, GetCommentParams, GetPaginatedCommentsParams, PaginationResult};

/// Read side of the comment module.
#[derive(Clone)]
pub(crate) struct CommentReader {
    repository: Arc<dyn CommentRepository>,
}

impl CommentReader {
    pub(crate) fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    pub(crate) async fn get_comment(&self, params: &GetCommentParams) -> Result<Comment, AppError> {
        self.repository
            .find_one(&params.key())
            .await?
            .map(Comment::from)
            .ok_or_else(|| AppError::comment_not_found(params.comment_id))
    }

    pub(crate) async fn get_paginated_comments(
        &self,
        params: &GetPaginatedCommentsParams,
    ) -> Result<PaginationResult<Comment>, AppError> {
        let pagination = params.pagination_params;
        let total_count = self
            .repository
            .count(params.task_id, params.account_id)
            .await?;

        // Past the last page there is nothing to fetch.
        let records = if pagination.offset() >= total_count {
            Vec::new()
        } else {
            self.repository
                .find_page(&CommentPageQuery {
                    task_id: params.task_id,
                    account_id: params.account_id,
                    sort: params.sort_params.unwrap_or_default(),
                    offset: pagination.offset(),
                    limit: pagination.size(),
                })
                .await?
        };

        Ok(PaginationResult::new(records, pagination, total_count).map(Comment::from))
    }
}
