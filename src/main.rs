mod models;
mod handlers;
mod services;
mod middleware;
mod imaging;
mod config;
mod errors;
mod templates;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
};
use tower_http::{
    services::ServeDir,
    limit::RequestBodyLimitLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use crate::{
    services::GalleryStorage,
    config::Config,
};

fn build_router(storage: GalleryStorage, config: Config) -> Router {
    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    let static_dir = config.storage.static_dir.clone();
    let max_file_size = config.upload.max_file_size;

    Router::new()
        // Gallery routes
        .route("/", get(handlers::serve_home))
        .route("/about", get(handlers::serve_about_page))

        // Auth routes
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .route("/logout", get(handlers::handle_logout))

        // Image routes
        .route("/upload", get(handlers::serve_upload_page).post(handlers::process_upload))
        .route("/image/:username/:category/:filename", get(handlers::serve_image))
        .route("/delete_image/:category/:filename", post(handlers::delete_image))

        // Static files, thumbnails included
        .nest_service("/static", ServeDir::new(static_dir))

        // Only matched routes go through the login check; the 404 fallback stays public
        .route_layer(from_fn(middleware::require_auth))
        .fallback(handlers::not_found)
        .layer(session_layer)

        // File upload limits from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_file_size))

        // Add state
        .with_state((storage, config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    let storage = GalleryStorage::from_config(&config.storage);
    let address = format!("{}:{}", config.server.host, config.server.port);

    if config.auth.users.is_empty() {
        tracing::warn!("No users configured; nobody will be able to log in");
    }

    let app = build_router(storage, config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind server to {}", address))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Failed to start server")?;
    Ok(())
}
