use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::Request,
    body::Body,
};
use tower_sessions::Session;
use crate::models::FlashLevel;
use crate::services::session_service::{current_user, push_flash};

const PUBLIC_PATHS: &[&str] = &["/login", "/logout", "/about"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || path.starts_with("/static/")
}

/// Redirects to the login page, with a warning notice, when no user is in the session.
pub async fn require_auth(
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    if is_public(&path) {
        return next.run(req).await;
    }

    match current_user(&session).await {
        Ok(Some(_)) => next.run(req).await,
        Ok(None) => {
            tracing::debug!("Unauthenticated request for {}", path);
            if let Err(e) = push_flash(&session, FlashLevel::Warning, "You need to log in first!").await {
                tracing::warn!("Failed to store login notice: {}", e);
            }
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            tracing::error!("Session lookup failed: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}
