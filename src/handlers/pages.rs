use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use crate::errors::AppResult;
use crate::services::session_service::take_flashes;
use crate::templates::{AboutTemplate, HtmlTemplate, LayoutContext};

pub const NOT_FOUND_TEXT: &str = "HTTP Error 404 - Page Not Found";

pub async fn serve_about_page(session: Session) -> AppResult<Response> {
    let flashes = take_flashes(&session).await?;
    let template = AboutTemplate {
        layout: LayoutContext::new("About Page", flashes),
    };
    Ok(HtmlTemplate::new(template).into_response())
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND_TEXT)
}
