use std::sync::Arc;

use validator::Validate;

use super::reader::CommentReader;
use super::repository::CommentRepository;
use super::writer::CommentWriter;
use crate::error::AppError;
use crate::models::{
    Comment, CommentDeletionResult, CreateCommentParams, DeleteCommentParams, GetCommentParams,
    GetPaginatedCommentsParams, PaginationResult, UpdateCommentParams,
};

/// Entry point for everything comment related.
///
/// Every lookup is keyed by task, comment and owning account together. A comment
/// owned by someone else, or attached to a different task, produces the same
/// `NotFound` as one that never existed.
#[derive(Clone)]
pub struct CommentService {
    reader: CommentReader,
    writer: CommentWriter,
}

impl CommentService {
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self {
            reader: CommentReader::new(repository.clone()),
            writer: CommentWriter::new(repository),
        }
    }

    pub async fn create_comment(&self, params: CreateCommentParams) -> Result<Comment, AppError> {
        params.validate()?;
        self.writer.create_comment(params).await
    }

    pub async fn get_comment(&self, params: GetCommentParams) -> Result<Comment, AppError> {
        self.reader.get_comment(&params).await
    }

    pub async fn get_paginated_comments(
        &self,
        params: GetPaginatedCommentsParams,
    ) -> Result<PaginationResult<Comment>, AppError> {
        self.reader.get_paginated_comments(&params).await
    }

    pub async fn update_comment(&self, params: UpdateCommentParams) -> Result<Comment, AppError> {
        params.validate()?;
        self.writer.update_comment(params).await
    }

    pub async fn delete_comment(
        &self,
        params: DeleteCommentParams,
    ) -> Result<CommentDeletionResult, AppError> {
        self.writer.delete_comment(params).await
    }
}
