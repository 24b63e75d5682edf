mod storage_service;
pub mod session_service;

pub use storage_service::{is_plain_name, CategoryListing, GalleryStorage};
