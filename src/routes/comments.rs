use crate::{
    auth::AuthenticatedAccount,
    comments::CommentService,
    error::AppError,
    models::{
        CreateCommentParams, DeleteCommentParams, GetCommentParams, GetPaginatedCommentsParams,
        PaginationParams, SortDirection, SortField, SortParams, UpdateCommentParams,
        pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
    },
};
use actix_web::{
    delete, error::JsonPayloadError, get, patch, post, web, HttpRequest, HttpResponse, Responder,
    Scope,
};
use serde::Deserialize;
use uuid::Uuid;

/// Path parameters of the comment collection routes.
///
/// Unknown segments such as `{account_id}` are ignored here; they are checked by
/// the `AuthenticatedAccount` extractor.
#[derive(Debug, Deserialize)]
pub struct TaskPath {
    pub task_id: Uuid,
}

/// Path parameters of the single-comment routes.
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub task_id: Uuid,
    pub comment_id: Uuid,
}

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
pub struct CommentContentRequest {
    pub content: Option<String>,
}

/// Query parameters accepted when listing comments.
#[derive(Debug, Default, Deserialize)]
pub struct ListCommentsQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

impl ListCommentsQuery {
    pub fn pagination_params(&self) -> Result<PaginationParams, AppError> {
        PaginationParams::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Sorting is only applied when at least one sort parameter is given.
    pub fn sort_params(&self) -> Option<SortParams> {
        if self.sort_by.is_none() && self.sort_direction.is_none() {
            return None;
        }
        Some(SortParams {
            sort_by: self.sort_by.unwrap_or_default(),
            sort_direction: self.sort_direction.unwrap_or_default(),
        })
    }
}

/// Pulls non-empty `content` out of a request body.
fn required_content(body: Option<CommentContentRequest>) -> Result<String, AppError> {
    let body = body.ok_or_else(|| AppError::BadRequest("Request body is required".into()))?;
    body.content
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::BadRequest("Content is required".into()))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = match &err {
        JsonPayloadError::ContentType => AppError::BadRequest("Request body is required".into()),
        JsonPayloadError::Deserialize(e) if e.is_eof() => {
            AppError::BadRequest("Request body is required".into())
        }
        _ => AppError::BadRequest(format!("Invalid request body: {}", err)),
    };
    app_err.into()
}

/// Builds the comment routes under `path`, which must contain `{task_id}`.
///
/// Malformed bodies and query strings are reported as `BadRequest`, and path
/// segments that are not UUIDs as `NotFound`, all in the JSON error format.
pub fn scope(path: &str) -> Scope {
    web::scope(path)
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid query parameters: {}", err)).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|_err, _req| {
            AppError::NotFound("Comment not found".into()).into()
        }))
        .service(get_comments)
        .service(create_comment)
        .service(get_comment)
        .service(update_comment)
        .service(delete_comment)
}

/// Adds a comment to a task on behalf of the authenticated account.
///
/// ## Request Body:
/// `{"content": "..."}` with non-empty content.
///
/// ## Responses:
/// - `201 Created`: the new `Comment`.
/// - `400 Bad Request`: body missing, or `content` missing or empty.
/// - `401 Unauthorized`: see `AuthMiddleware`.
#[post("")]
pub async fn create_comment(
    service: web::Data<CommentService>,
    account: AuthenticatedAccount,
    path: web::Path<TaskPath>,
    body: web::Json<Option<CommentContentRequest>>,
) -> Result<impl Responder, AppError> {
    let content = required_content(body.into_inner())?;

    let comment = service
        .create_comment(CreateCommentParams {
            task_id: path.task_id,
            account_id: account.id(),
            content,
        })
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Lists the caller's comments on a task, one page at a time.
///
/// ## Query Parameters:
/// - `page` (optional, default 1) and `size` (optional, default 10, at most 100).
/// - `sort_by` (optional): `created_at` or `updated_at`.
/// - `sort_direction` (optional): `asc` or `desc`.
///
/// Without sort parameters comments come back in the order they were written.
///
/// ## Responses:
/// - `200 OK`: `{items, pagination_params, total_count, total_pages}`.
/// - `400 Bad Request`: out-of-range or malformed query parameters.
#[get("")]
pub async fn get_comments(
    service: web::Data<CommentService>,
    account: AuthenticatedAccount,
    path: web::Path<TaskPath>,
    query: web::Query<ListCommentsQuery>,
) -> Result<impl Responder, AppError> {
    let page = service
        .get_paginated_comments(GetPaginatedCommentsParams {
            task_id: path.task_id,
            account_id: account.id(),
            pagination_params: query.pagination_params()?,
            sort_params: query.sort_params(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Fetches a single comment.
///
/// ## Responses:
/// - `200 OK`: the `Comment`.
/// - `404 Not Found`: no such comment on this task, or it belongs to another account.
#[get("/{comment_id}")]
pub async fn get_comment(
    service: web::Data<CommentService>,
    account: AuthenticatedAccount,
    path: web::Path<CommentPath>,
) -> Result<impl Responder, AppError> {
    let comment = service
        .get_comment(GetCommentParams {
            task_id: path.task_id,
            comment_id: path.comment_id,
            account_id: account.id(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Replaces the content of a comment.
///
/// ## Responses:
/// - `200 OK`: the updated `Comment`, with `updated_at` set.
/// - `400 Bad Request`: body missing, or `content` missing or empty.
/// - `404 Not Found`: as for `get_comment`.
#[patch("/{comment_id}")]
pub async fn update_comment(
    service: web::Data<CommentService>,
    account: AuthenticatedAccount,
    path: web::Path<CommentPath>,
    body: web::Json<Option<CommentContentRequest>>,
) -> Result<impl Responder, AppError> {
    let content = required_content(body.into_inner())?;

    let comment = service
        .update_comment(UpdateCommentParams {
            task_id: path.task_id,
            comment_id: path.comment_id,
            account_id: account.id(),
            content,
        })
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Deletes a comment permanently.
///
/// ## Responses:
/// - `200 OK`: `{comment_id, deleted_at, success}`.
/// - `404 Not Found`: as for `get_comment`.
#[delete("/{comment_id}")]
pub async fn delete_comment(
    service: web::Data<CommentService>,
    account: AuthenticatedAccount,
    path: web::Path<CommentPath>,
) -> Result<impl Responder, AppError> {
    let receipt = service
        .delete_comment(DeleteCommentParams {
            task_id: path.task_id,
            comment_id: path.comment_id,
            account_id: account.id(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_content() {
        assert_eq!(
            required_content(None).unwrap_err(),
            AppError::BadRequest("Request body is required".into())
        );
        assert_eq!(
            required_content(Some(CommentContentRequest { content: None })).unwrap_err(),
            AppError::BadRequest("Content is required".into())
        );
        assert_eq!(
            required_content(Some(CommentContentRequest {
                content: Some(String::new())
            }))
            .unwrap_err(),
            AppError::BadRequest("Content is required".into())
        );
        assert_eq!(
            required_content(Some(CommentContentRequest {
                content: Some("hi".into())
            }))
            .unwrap(),
            "hi"
        );
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListCommentsQuery::default();
        assert_eq!(query.pagination_params().unwrap(), PaginationParams::default());
        assert_eq!(query.sort_params(), None);

        let query = ListCommentsQuery {
            sort_direction: Some(SortDirection::Desc),
            ..Default::default()
        };
        assert_eq!(
            query.sort_params(),
            Some(SortParams {
                sort_by: SortField::CreatedAt,
                sort_direction: SortDirection::Desc,
            })
        );
    }

    #[test]
    fn test_list_query_rejects_page_zero() {
        let query = ListCommentsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            query.pagination_params(),
            Err(AppError::BadRequest(_))
        ));
    }
}
