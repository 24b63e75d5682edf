pub mod thumbnail;

pub use thumbnail::{generate_thumbnail, DEFAULT_THUMBNAIL_SIZE};
