use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{FlashLevel, LoginForm};
use crate::services::GalleryStorage;
use crate::services::session_service::{clear_user, current_user, push_flash, store_user, take_flashes};
use crate::templates::{HtmlTemplate, LayoutContext, LoginTemplate};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

async fn redirect_if_logged_in(session: &Session) -> AppResult<Option<Response>> {
    if current_user(session).await?.is_some() {
        push_flash(session, FlashLevel::Info, "You are already logged in!").await?;
        return Ok(Some(Redirect::to("/").into_response()));
    }
    Ok(None)
}

async fn render_login_page(session: &Session, error_msg: Option<&str>) -> AppResult<Response> {
    let flashes = take_flashes(session).await?;
    let template = LoginTemplate {
        layout: LayoutContext::new("Login", flashes).without_nav(),
        error_msg: error_msg.map(String::from),
    };
    Ok(HtmlTemplate::new(template).into_response())
}

pub async fn serve_login_page(session: Session) -> AppResult<Response> {
    if let Some(redirect) = redirect_if_logged_in(&session).await? {
        return Ok(redirect);
    }
    render_login_page(&session, None).await
}

#[axum::debug_handler]
pub async fn handle_login(
    State((_, config)): State<(GalleryStorage, Config)>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Some(redirect) = redirect_if_logged_in(&session).await? {
        return Ok(redirect);
    }

    tracing::info!("Login attempt for user: {}", login_form.username);

    if !config.auth.verify(&login_form.username, &login_form.password) {
        tracing::info!("Rejected login for user: {}", login_form.username);
        return render_login_page(&session, Some(INVALID_CREDENTIALS)).await;
    }

    store_user(&session, &login_form.username).await?;
    push_flash(&session, FlashLevel::Success, "You have successfully logged in!").await?;
    tracing::info!("User logged in: {}", login_form.username);
    Ok(Redirect::to("/").into_response())
}

#[axum::debug_handler]
pub async fn handle_logout(
    session: Session,
) -> AppResult<Response> {
    if let Some(username) = current_user(&session).await? {
        tracing::info!("User logged out: {}", username);
    }
    clear_user(&session).await?;
    push_flash(&session, FlashLevel::Info, "Logged out successfully.").await?;
    Ok(Redirect::to("/login").into_response())
}
