mod common;

use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{rt, test, web, App, HttpServer};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::net::TcpListener;
use uuid::Uuid;

use common::{assert_error, comments_url, send, TestContext, TEST_JWT_SECRET};
use task_comments::auth::{AuthMiddleware, Claims, JwtKeys};
use task_comments::routes::{self, health};

#[actix_rt::test]
async fn test_missing_authorization_header() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let req = test::TestRequest::post()
        .uri(&comments_url(Uuid::new_v4()))
        .set_json(json!({ "content": "no token" }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_error(status, &body, 401, "ACCESS_TOKEN_ERR_05");
}

#[actix_rt::test]
async fn test_malformed_authorization_header() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let account = ctx.account();

    let malformed = [
        format!("Token {}", account.token),
        format!("bearer {}", account.token),
        "Bearer".to_string(),
        format!("Bearer {} extra", account.token),
    ];
    for value in malformed {
        let req = test::TestRequest::get()
            .uri(&comments_url(Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, value.clone()))
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_error(status, &body, 401, "ACCESS_TOKEN_ERR_06");
        assert_eq!(body["message"], "Invalid authorization header.", "{}", value);
    }
}

#[actix_rt::test]
async fn test_invalid_access_tokens() {
    let ctx = TestContext::new();
    let app = ctx.app().await;
    let account_id = Uuid::new_v4();

    let foreign_token = JwtKeys::new("some-other-secret", Duration::hours(1))
        .generate_token(account_id)
        .unwrap();

    let expired_at = Utc::now() - Duration::hours(2);
    let expired_token = encode(
        &Header::default(),
        &Claims {
            sub: account_id,
            iat: (expired_at - Duration::hours(1)).timestamp() as usize,
            exp: expired_at.timestamp() as usize,
        },
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    for token in [foreign_token, expired_token, "not.a.jwt".to_string()] {
        let req = test::TestRequest::get()
            .uri(&comments_url(Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_error(status, &body, 401, "ACCESS_TOKEN_ERR_02");
    }
}

#[actix_rt::test]
async fn test_health_does_not_require_a_token() {
    let ctx = TestContext::new();
    let app = ctx.app().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn test_create_comment_unauthorized_over_http() {
    let ctx = TestContext::new();
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let service = ctx.service.clone();
    let keys = ctx.keys.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(keys.clone()))
                    .configure(routes::config),
            )
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen on bound port")
    .run();
    let handle = server.handle();
    rt::spawn(server);

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}{}", port, comments_url(Uuid::new_v4()));

    let resp = client
        .post(&url)
        .json(&json!({ "content": "Unauthorized comment" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.expect("error body should be JSON");
    assert_eq!(body["code"], "ACCESS_TOKEN_ERR_05");

    let account = ctx.account();
    let resp = client
        .post(&url)
        .bearer_auth(&account.token)
        .json(&json!({ "content": "Authorized comment" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    handle.stop(false).await;
}
