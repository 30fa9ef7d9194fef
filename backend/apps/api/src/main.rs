//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use auth::{PgUserRepository, auth_router};
use axum::{
    Json, Router, http,
    extract::DefaultBodyLimit,
    http::{Method, header},
    routing::get,
};
use catalog::{PgBookRepository, book_router};
use media::CloudinaryGateway;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,media=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let signer = config.signer();
    let auth_config = config.auth_config(signer.clone());
    let book_config = config.book_config(signer);

    tracing::info!(
        secure_cookie = auth_config.cookie_secure,
        enforce_ownership = book_config.enforce_ownership,
        compensate_failed_uploads = book_config.compensate_failed_uploads,
        "Session and book workflow configured"
    );

    let media = CloudinaryGateway::new(config.media.clone())?;
    tracing::info!(
        cloud_name = %config.media.cloud_name,
        root_folder = %config.media.root_folder,
        "Media gateway ready"
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let api = auth_router(PgUserRepository::new(pool.clone()), auth_config).merge(book_router(
        PgBookRepository::new(pool),
        media,
        book_config,
    ));

    // Build router
    let app = Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({ "message": "ok" })) }),
        )
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
