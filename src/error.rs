//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type shared by the comment module and the
//! access-token boundary. Every variant carries a human readable message and maps
//! to a stable error code and HTTP status, so clients can branch on `code` without
//! parsing messages.
//!
//! `AppError` implements `actix_web::error::ResponseError`, rendering errors as
//! `{"code": ..., "message": ...}` JSON bodies. `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors` and `jsonwebtoken::errors::Error`
//! allow conversion with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Stable error codes returned in the `code` field of error responses.
pub mod codes {
    pub const COMMENT_NOT_FOUND: &str = "COMMENT_ERR_01";
    pub const COMMENT_BAD_REQUEST: &str = "COMMENT_ERR_02";

    pub const ACCESS_TOKEN_INVALID: &str = "ACCESS_TOKEN_ERR_02";
    pub const UNAUTHORIZED_ACCESS: &str = "ACCESS_TOKEN_ERR_04";
    pub const AUTHORIZATION_HEADER_NOT_FOUND: &str = "ACCESS_TOKEN_ERR_05";
    pub const INVALID_AUTHORIZATION_HEADER: &str = "ACCESS_TOKEN_ERR_06";

    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_ERR_01";
    pub const DATABASE_ERROR: &str = "INTERNAL_ERR_02";
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The requested comment does not exist, or is not visible to the caller (HTTP 404).
    ///
    /// Comments owned by another account or attached to another task are reported
    /// through this variant as well.
    NotFound(String),
    /// Malformed or missing input, such as an empty body or empty content (HTTP 400).
    BadRequest(String),
    /// The authenticated account does not match the account addressed by the path (HTTP 401).
    Unauthorized(String),
    /// The request carries no `Authorization` header (HTTP 401).
    AuthorizationHeaderMissing(String),
    /// The `Authorization` header is not of the form `Bearer <token>` (HTTP 401).
    InvalidAuthorizationHeader(String),
    /// The bearer token is malformed, expired, or signed with another key (HTTP 401).
    InvalidAccessToken(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    /// The stable code reported to clients for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::COMMENT_NOT_FOUND,
            AppError::BadRequest(_) => codes::COMMENT_BAD_REQUEST,
            AppError::Unauthorized(_) => codes::UNAUTHORIZED_ACCESS,
            AppError::AuthorizationHeaderMissing(_) => codes::AUTHORIZATION_HEADER_NOT_FOUND,
            AppError::InvalidAuthorizationHeader(_) => codes::INVALID_AUTHORIZATION_HEADER,
            AppError::InvalidAccessToken(_) => codes::ACCESS_TOKEN_INVALID,
            AppError::InternalServerError(_) => codes::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => codes::DATABASE_ERROR,
        }
    }

    /// The message carried by the error, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::AuthorizationHeaderMissing(msg)
            | AppError::InvalidAuthorizationHeader(msg)
            | AppError::InvalidAccessToken(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg) => msg,
        }
    }

    /// Shorthand for the not-found error raised when a comment lookup misses.
    pub fn comment_not_found(comment_id: impl fmt::Display) -> Self {
        AppError::NotFound(format!("Comment with id {} not found", comment_id))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::AuthorizationHeaderMissing(msg) => {
                write!(f, "Authorization Header Missing: {}", msg)
            }
            AppError::InvalidAuthorizationHeader(msg) => {
                write!(f, "Invalid Authorization Header: {}", msg)
            }
            AppError::InvalidAccessToken(msg) => write!(f, "Invalid Access Token: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Server-side failures are logged here and answered with a generic message, so
/// database details never reach the client.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_)
            | AppError::AuthorizationHeaderMissing(_)
            | AppError::InvalidAuthorizationHeader(_)
            | AppError::InvalidAccessToken(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::InternalServerError(msg) => {
                log::error!("internal server error: {}", msg);
                "Internal server error"
            }
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                "Database error"
            }
            other => other.message(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "code": self.code(),
            "message": message,
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; everything else becomes `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
///
/// An empty `content` field is reported with the same message the view uses
/// for a missing one.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        if error.field_errors().contains_key("content") {
            AppError::BadRequest("Content is required".into())
        } else {
            AppError::BadRequest(error.to_string())
        }
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::InvalidAccessToken`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidAccessToken(format!("Invalid token: {}", error))
    }
}
