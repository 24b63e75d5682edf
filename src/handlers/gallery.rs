use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use urlencoding::encode;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::FlashLevel;
use crate::services::{CategoryListing, GalleryStorage};
use crate::services::session_service::{push_flash, take_flashes};
use crate::templates::{CategoryView, HomeTemplate, HtmlTemplate, LayoutContext, PhotoView};
use super::session_username;

const EMPTY_COLLECTION: &str = r#"You have not added any photos to your collection. Click "Upload"."#;

pub async fn serve_home(
    State((storage, config)): State<(GalleryStorage, Config)>,
    session: Session,
) -> AppResult<Response> {
    let username = session_username(&session).await?;
    tracing::info!("Listing collection for user: {}", username);

    storage.ensure_user_dirs(&username).await.map_err(|e| {
        tracing::error!("Failed to create directories for {}: {}", username, e);
        e
    })?;

    let categories = storage.list_categories(&username).await?;
    tracing::debug!("User {} has {} visible categories", username, categories.len());

    if categories.is_empty() {
        push_flash(&session, FlashLevel::Info, EMPTY_COLLECTION).await?;
    }

    let flashes = take_flashes(&session).await?;
    let template = HomeTemplate {
        layout: LayoutContext::new(format!("{}'s collection", username), flashes),
        categories: category_views(&username, &categories, &config.storage.thumbnail_url_prefix()),
        username,
    };
    Ok(HtmlTemplate::new(template).into_response())
}

// Percent-encodes every path segment; the template escapes the rest.
fn category_views(username: &str, categories: &CategoryListing, thumbnail_prefix: &str) -> Vec<CategoryView> {
    let user = encode(username);
    categories
        .iter()
        .map(|(category, images)| {
            let category_url = encode(category);
            let photos = images
                .iter()
                .map(|filename| {
                    let file_url = encode(filename);
                    PhotoView {
                        filename: filename.clone(),
                        image_url: format!("/image/{}/{}/{}", user, category_url, file_url),
                        thumbnail_url: format!("{}/{}/{}/{}", thumbnail_prefix, user, category_url, file_url),
                        delete_url: format!("/delete_image/{}/{}", category_url, file_url),
                    }
                })
                .collect();

            CategoryView {
                name: category.clone(),
                photos,
            }
        })
        .collect()
}
