pub mod comments;
pub mod health;

use actix_web::web;

/// Registers every authenticated route. Expects to be mounted inside a scope
/// wrapped by `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(comments::scope("/tasks/{task_id}/comments"))
        .service(comments::scope(
            "/accounts/{account_id}/tasks/{task_id}/comments",
        ));
}
