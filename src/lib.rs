#![doc = "The `task_comments` library crate."]
#![doc = ""]
#![doc = "Comments that accounts leave on tasks: domain models, the comment service and"]
#![doc = "its storage backends, bearer-token access control, HTTP routes and error handling."]
#![doc = "The binary (`main.rs`) wires these into an actix-web server."]

pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

pub use crate::comments::CommentService;
pub use crate::error::AppError;
