use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;

use task_comments::auth::{AuthMiddleware, JwtKeys};
use task_comments::comments::{
    CommentRepository, CommentService, InMemoryCommentRepository, PgCommentRepository,
};
use task_comments::config::Config;
use task_comments::routes::{self, health};

fn io_error(error: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}

/// Picks the comment store: Postgres when `DATABASE_URL` is set, memory otherwise.
async fn build_repository(config: &Config) -> io::Result<Arc<dyn CommentRepository>> {
    let Some(database_url) = &config.database_url else {
        log::warn!("DATABASE_URL is not set; comments are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryCommentRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
        .map_err(io_error)?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(io_error)?;

    log::info!("Using Postgres comment store");
    Ok(Arc::new(PgCommentRepository::new(pool)))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let repository = build_repository(&config).await?;
    let service = web::Data::new(CommentService::new(repository));
    let keys = JwtKeys::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.jwt_expiration_hours),
    );

    log::info!("Starting task comments server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(keys.clone()))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
