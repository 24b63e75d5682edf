// Application error type and result alias, built on thiserror.
use thiserror::Error;

pub mod response;
pub mod thumbnail;

pub use thumbnail::{ThumbnailError, ThumbnailResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Upload error: {0}")]
    Upload(String),

    // Keeps the rejection's own status, e.g. 413 from the body-limit layer.
    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Not found: {0}")]
    NotFound(String),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
