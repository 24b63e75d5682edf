use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::imaging::DEFAULT_THUMBNAIL_SIZE;
use crate::models::User;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    pub upload: UploadConfig,
    pub gallery: GalleryConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub thumbnail_subdir: String,
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct GalleryConfig {
    pub shared_image_access: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub users: Vec<User>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        let (width, height) = DEFAULT_THUMBNAIL_SIZE;
        Self { width, height }
    }
}

impl ThumbnailConfig {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl StorageConfig {
    pub fn thumbnail_root(&self) -> PathBuf {
        self.static_dir.join(&self.thumbnail_subdir)
    }

    /// URL prefix under which thumbnails are reachable through the static service.
    pub fn thumbnail_url_prefix(&self) -> String {
        format!("/static/{}", self.thumbnail_subdir.trim_matches('/'))
    }

    /// An empty extension list accepts every file.
    pub fn is_allowed(&self, filename: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

impl AuthConfig {
    // Plaintext comparison; the credential list comes straight from config.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .iter()
            .any(|user| user.username == username && user.password == password)
    }
}

#[cfg(test)]
pub fn test_config(root: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        storage: StorageConfig {
            upload_dir: root.join("uploads"),
            static_dir: root.join("static"),
            thumbnail_subdir: "thumbnails".into(),
            allowed_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
        },
        thumbnail: ThumbnailConfig::default(),
        upload: UploadConfig {
            max_file_size: 10 * 1024 * 1024,
        },
        gallery: GalleryConfig {
            shared_image_access: true,
        },
        auth: AuthConfig {
            users: vec![User {
                username: "pebble".into(),
                password: "pebble123".into(),
            }],
        },
    }
}
