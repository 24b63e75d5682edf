use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use crate::config::StorageConfig;

/// Category name to the filenames that have both an original and a thumbnail.
pub type CategoryListing = BTreeMap<String, Vec<String>>;

/// Directory-backed image store.
///
/// Originals live under `<upload_root>/<username>/<category>/<filename>` and
/// thumbnails mirror that layout under `<thumbnail_root>`. There is no index:
/// an image is visible only while its thumbnail file exists.
#[derive(Debug, Clone)]
pub struct GalleryStorage {
    upload_root: PathBuf,
    thumbnail_root: PathBuf,
}

/// True when `name` is exactly one ordinary path component.
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == OsStr::new(name),
        _ => false,
    }
}

fn invalid_path(username: &str, category: &str, filename: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid image path {}/{}/{}", username, category, filename),
    )
}

impl GalleryStorage {
    pub fn new(upload_root: impl Into<PathBuf>, thumbnail_root: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
            thumbnail_root: thumbnail_root.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.upload_dir.clone(), config.thumbnail_root())
    }

    pub fn user_upload_dir(&self, username: &str) -> PathBuf {
        self.upload_root.join(username)
    }

    pub fn user_thumbnail_dir(&self, username: &str) -> PathBuf {
        self.thumbnail_root.join(username)
    }

    pub fn original_path(&self, username: &str, category: &str, filename: &str) -> PathBuf {
        self.user_upload_dir(username).join(category).join(filename)
    }

    pub fn thumbnail_path(&self, username: &str, category: &str, filename: &str) -> PathBuf {
        self.user_thumbnail_dir(username).join(category).join(filename)
    }

    /// Checked variant of [`original_path`](Self::original_path) for names taken from a URL.
    pub fn resolve_original(
        &self,
        username: &str,
        category: &str,
        filename: &str,
    ) -> io::Result<PathBuf> {
        if ![username, category, filename].iter().all(|name| is_plain_name(name)) {
            return Err(invalid_path(username, category, filename));
        }
        Ok(self.original_path(username, category, filename))
    }

    pub async fn ensure_user_dirs(&self, username: &str) -> io::Result<()> {
        fs::create_dir_all(self.user_upload_dir(username)).await?;
        fs::create_dir_all(self.user_thumbnail_dir(username)).await
    }

    pub async fn ensure_category_dirs(&self, username: &str, category: &str) -> io::Result<()> {
        fs::create_dir_all(self.user_upload_dir(username).join(category)).await?;
        fs::create_dir_all(self.user_thumbnail_dir(username).join(category)).await
    }

    /// Write an original, replacing any previous file with the same name.
    pub async fn save_original(
        &self,
        username: &str,
        category: &str,
        filename: &str,
        data: &[u8],
    ) -> io::Result<PathBuf> {
        let path = self.original_path(username, category, filename);
        fs::write(&path, data).await?;
        tracing::debug!("Saved original {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Categories with at least one image whose thumbnail exists, sorted by name.
    pub async fn list_categories(&self, username: &str) -> io::Result<CategoryListing> {
        let upload_dir = self.user_upload_dir(username);
        let thumbnail_dir = self.user_thumbnail_dir(username);
        let mut categories = CategoryListing::new();

        let mut entries = fs::read_dir(&upload_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Ok(category) = entry.file_name().into_string() else {
                tracing::warn!("Skipping non UTF-8 category in {}", upload_dir.display());
                continue;
            };

            let mut images = Vec::new();
            let mut files = fs::read_dir(entry.path()).await?;
            while let Some(file) = files.next_entry().await? {
                let Ok(filename) = file.file_name().into_string() else {
                    continue;
                };
                let thumbnail = thumbnail_dir.join(&category).join(&filename);
                if fs::try_exists(&thumbnail).await.unwrap_or(false) {
                    images.push(filename);
                } else {
                    tracing::debug!("No thumbnail for {}/{}, hiding it", category, filename);
                }
            }

            if !images.is_empty() {
                images.sort();
                categories.insert(category, images);
            }
        }

        Ok(categories)
    }

    /// Remove the original and then its thumbnail. The category directory stays.
    pub async fn delete_image(&self, username: &str, category: &str, filename: &str) -> io::Result<()> {
        let original = self.resolve_original(username, category, filename)?;
        fs::remove_file(&original).await?;
        fs::remove_file(self.thumbnail_path(username, category, filename)).await
    }
}
