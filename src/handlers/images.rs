use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response, Redirect},
    http::{header, HeaderValue},
    body::Body,
};
use std::io::ErrorKind;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::FlashLevel;
use crate::services::GalleryStorage;
use crate::services::session_service::push_flash;
use super::session_username;

/// Streams an original upload.
///
/// The owner comes from the URL. Unless `gallery.shared_image_access` is
/// off, any logged-in user can read any other user's originals.
pub async fn serve_image(
    State((storage, config)): State<(GalleryStorage, Config)>,
    session: Session,
    Path((username, category, filename)): Path<(String, String, String)>,
) -> AppResult<Response> {
    let viewer = session_username(&session).await?;
    tracing::debug!("{} requested image {}/{}/{}", viewer, username, category, filename);

    if !config.gallery.shared_image_access && viewer != username {
        tracing::warn!("{} denied access to images of {}", viewer, username);
        return Err(AppError::NotFound(format!("{}/{}/{}", username, category, filename)));
    }

    let path = storage
        .resolve_original(&username, &category, &filename)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    let file = File::open(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => {
            tracing::error!("Failed to open image {}: {}", path.display(), e);
            AppError::File(e)
        }
    })?;
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(AppError::NotFound(path.display().to_string()));
    }

    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();
    let content_type = HeaderValue::from_str(content_type.essence_str())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let mut response = Response::new(Body::from_stream(ReaderStream::new(file)));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
    Ok(response)
}

/// Removes one of the session user's images. Always lands back on the home page.
pub async fn delete_image(
    State((storage, _)): State<(GalleryStorage, Config)>,
    session: Session,
    Path((category, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    let username = session_username(&session).await?;
    tracing::info!("Attempting to delete {}/{} for user {}", category, filename, username);

    match storage.delete_image(&username, &category, &filename).await {
        Ok(()) => {
            tracing::info!("Deleted {}/{} for user {}", category, filename, username);
            push_flash(&session, FlashLevel::Success, "Image deleted successfully!").await?;
        }
        Err(e) => {
            tracing::warn!("Failed to delete {}/{} for user {}: {}", category, filename, username, e);
            push_flash(&session, FlashLevel::Danger, format!("Error deleting image: {}", e)).await?;
        }
    }

    Ok(Redirect::to("/").into_response())
}
