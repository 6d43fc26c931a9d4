//! Comments left by accounts on tasks.
//!
//! `CommentService` is the public façade. It validates parameters and delegates
//! to a reader and a writer, which translate between storage records and domain
//! values on top of a `CommentRepository`.

pub mod memory;
pub mod postgres;
mod reader;
pub mod repository;
pub mod service;
mod writer;

pub use memory::InMemoryCommentRepository;
pub use postgres::PgCommentRepository;
pub use repository::{CommentPageQuery, CommentRepository};
pub use service::CommentService;
