pub mod comment;
pub mod pagination;

pub use comment::{
    Comment, CommentDeletionResult, CommentKey, CommentRecord, CreateCommentParams,
    DeleteCommentParams, GetCommentParams, GetPaginatedCommentsParams, UpdateCommentParams,
};
pub use pagination::{PaginationParams, PaginationResult, SortDirection, SortField, SortParams};
