use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Image file not found at {0}")]
    SourceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Thumbnail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type ThumbnailResult<T> = Result<T, ThumbnailError>;
