use tower_sessions::{session::Error as SessionError, Session};
use crate::models::{Flash, FlashLevel};

pub const SESSION_USER_KEY: &str = "user_session";
pub const SESSION_FLASH_KEY: &str = "_flashes";

pub async fn current_user(session: &Session) -> Result<Option<String>, SessionError> {
    session.get::<String>(SESSION_USER_KEY).await
}

pub async fn store_user(session: &Session, username: &str) -> Result<(), SessionError> {
    session.insert(SESSION_USER_KEY, username).await
}

pub async fn clear_user(session: &Session) -> Result<(), SessionError> {
    let _ = session.remove::<String>(SESSION_USER_KEY).await?;
    Ok(())
}

/// Queue a notice for the next page that drains the session's flashes.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), SessionError> {
    let mut flashes = session
        .get::<Vec<Flash>>(SESSION_FLASH_KEY)
        .await?
        .unwrap_or_default();
    flashes.push(Flash::new(level, message));
    session.insert(SESSION_FLASH_KEY, flashes).await
}

pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, SessionError> {
    Ok(session
        .remove::<Vec<Flash>>(SESSION_FLASH_KEY)
        .await?
        .unwrap_or_default())
}
