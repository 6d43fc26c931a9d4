#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use task_comments::auth::{AuthMiddleware, JwtKeys};
use task_comments::comments::{CommentService, InMemoryCommentRepository};
use task_comments::models::{Comment, CreateCommentParams};
use task_comments::routes::{self, health};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const DEFAULT_COMMENT_CONTENT: &str = "This is a test comment";

/// An account with a valid token.
pub struct TestAccount {
    pub id: Uuid,
    pub token: String,
}

impl TestAccount {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub struct TestContext {
    pub service: web::Data<CommentService>,
    pub keys: JwtKeys,
}

impl TestContext {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryCommentRepository::new());
        Self {
            service: web::Data::new(CommentService::new(repository)),
            keys: JwtKeys::new(TEST_JWT_SECRET, Duration::hours(1)),
        }
    }

    pub fn account(&self) -> TestAccount {
        let id = Uuid::new_v4();
        TestAccount {
            id,
            token: self.keys.generate_token(id).unwrap(),
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(self.service.clone())
                .wrap(Logger::default())
                .service(health::health)
                .service(
                    web::scope("/api")
                        .wrap(AuthMiddleware::new(self.keys.clone()))
                        .configure(routes::config),
                ),
        )
        .await
    }

    /// Creates a comment directly through the service, bypassing HTTP.
    pub async fn create_comment(&self, task_id: Uuid, account_id: Uuid, content: &str) -> Comment {
        self.service
            .create_comment(CreateCommentParams {
                task_id,
                account_id,
                content: content.to_string(),
            })
            .await
            .unwrap()
    }
}

pub fn comments_url(task_id: Uuid) -> String {
    format!("/api/tasks/{}/comments", task_id)
}

pub fn comment_url(task_id: Uuid, comment_id: impl std::fmt::Display) -> String {
    format!("/api/tasks/{}/comments/{}", task_id, comment_id)
}

/// Calls the app and returns the status with the JSON body (`Null` when empty).
///
/// Errors raised by middleware never reach a handler, so they are rendered here
/// the same way the server would render them.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            let body = test::read_body(resp).await;
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.unwrap();
            (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
        }
    }
}

pub fn assert_error(status: StatusCode, body: &Value, expected_status: u16, expected_code: &str) {
    assert_eq!(status, expected_status, "unexpected status, body: {}", body);
    assert_eq!(body["code"], expected_code, "unexpected body: {}", body);
}

pub fn assert_comment(body: &Value, content: &str, task_id: Uuid, account_id: Uuid) {
    assert_eq!(body["content"], content);
    assert_eq!(body["task_id"], task_id.to_string());
    assert_eq!(body["account_id"], account_id.to_string());
    assert!(body["created_at"].is_string(), "created_at missing: {}", body);
}
