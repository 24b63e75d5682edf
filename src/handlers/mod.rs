mod auth;
mod gallery;
mod upload;
mod images;
mod pages;

use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::services::session_service::current_user;

pub use auth::{serve_login_page, handle_login, handle_logout};
pub use gallery::serve_home;
pub use upload::{serve_upload_page, process_upload};
pub use images::{serve_image, delete_image};
pub use pages::{serve_about_page, not_found, NOT_FOUND_TEXT};

// Username of the logged-in user, or an Auth error that redirects to login.
async fn session_username(session: &Session) -> AppResult<String> {
    current_user(session)
        .await?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))
}
