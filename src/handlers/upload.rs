use axum::{
    extract::{Multipart, State, multipart::Field},
    response::{IntoResponse, Response, Redirect},
};
use bytes::Bytes;
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::imaging::generate_thumbnail;
use crate::models::FlashLevel;
use crate::services::{is_plain_name, GalleryStorage};
use crate::services::session_service::{push_flash, take_flashes};
use crate::templates::{HtmlTemplate, LayoutContext, UploadTemplate};
use super::session_username;

const DEFAULT_IMAGE_NAME: &str = "Unnamed";
const DEFAULT_CATEGORY: &str = "uncategorized";

pub async fn serve_upload_page(session: Session) -> AppResult<Response> {
    tracing::info!("Serving upload page");
    let flashes = take_flashes(&session).await?;
    let template = UploadTemplate {
        layout: LayoutContext::new("Upload", flashes),
    };
    Ok(HtmlTemplate::new(template).into_response())
}

struct UploadedFile {
    filename: String,
    data: Bytes,
}

// Form data collected from the multipart body. Fields may arrive in any order.
#[derive(Default)]
struct UploadData {
    file: Option<UploadedFile>,
    image_name: Option<String>,
    category: Option<String>,
}

impl UploadData {
    fn image_name(&self) -> &str {
        self.image_name.as_deref().unwrap_or(DEFAULT_IMAGE_NAME)
    }

    fn category(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.trim().is_empty() => category,
            _ => DEFAULT_CATEGORY,
        }
    }
}

/// Reasons an upload is bounced back to the form.
#[derive(Debug, PartialEq, Eq)]
enum Rejection {
    NoImagePart,
    NoSelectedFile,
    InvalidFileName,
    InvalidCategory,
    TypeNotAllowed,
}

impl Rejection {
    fn message(&self) -> &'static str {
        match self {
            Rejection::NoImagePart => "No image part",
            Rejection::NoSelectedFile => "No selected file",
            Rejection::InvalidFileName => "Invalid file name",
            Rejection::InvalidCategory => "Invalid category name",
            Rejection::TypeNotAllowed => "File type not allowed",
        }
    }
}

fn validate(data: &UploadData, config: &Config) -> Result<(), Rejection> {
    let file = data.file.as_ref().ok_or(Rejection::NoImagePart)?;
    if file.filename.is_empty() {
        return Err(Rejection::NoSelectedFile);
    }
    if !is_plain_name(&file.filename) {
        return Err(Rejection::InvalidFileName);
    }
    if !is_plain_name(data.category()) {
        return Err(Rejection::InvalidCategory);
    }
    if !config.storage.is_allowed(&file.filename) {
        return Err(Rejection::TypeNotAllowed);
    }
    Ok(())
}

pub async fn process_upload(
    State((storage, config)): State<(GalleryStorage, Config)>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let username = session_username(&session).await?;

    let data = process_multipart_form(&mut multipart, &username).await?;

    if let Err(rejection) = validate(&data, &config) {
        tracing::warn!("Rejected upload from {}: {}", username, rejection.message());
        push_flash(&session, FlashLevel::Danger, rejection.message()).await?;
        return Ok(Redirect::to("/upload").into_response());
    }

    let category = data.category();
    let Some(file) = data.file.as_ref() else {
        return Err(AppError::Upload("No image part".into()));
    };
    // Accepted but not stored anywhere; only the filename identifies an image.
    tracing::debug!("Upload display name: {}", data.image_name());

    storage.ensure_category_dirs(&username, category).await.map_err(|e| {
        tracing::error!("Failed to create category directories for {}/{}: {}", username, category, e);
        e
    })?;

    let image_path = storage
        .save_original(&username, category, &file.filename, &file.data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save upload {}: {}", file.filename, e);
            e
        })?;

    let thumbnail_path = storage.thumbnail_path(&username, category, &file.filename);
    if !generate_thumbnail(image_path, thumbnail_path, config.thumbnail.size()).await {
        tracing::warn!(
            "Thumbnail missing for {}/{}/{}; image stays hidden from the listing",
            username, category, file.filename
        );
    }

    tracing::info!("Stored {} in category {} for user {}", file.filename, category, username);
    push_flash(&session, FlashLevel::Success, "Image uploaded successfully!").await?;
    Ok(Redirect::to("/").into_response())
}

// Reads every field of the upload form into memory.
async fn process_multipart_form(
    multipart: &mut Multipart,
    username: &str,
) -> AppResult<UploadData> {
    tracing::debug!("Processing multipart form for user: {}", username);

    let mut data = UploadData::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field from multipart form: {}", e);
        AppError::Multipart(e)
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read uploaded file {}: {}", filename, e);
                    AppError::Multipart(e)
                })?;
                tracing::debug!("Received file {} ({} bytes)", filename, bytes.len());
                data.file = Some(UploadedFile { filename, data: bytes });
            }
            "image_name" => {
                data.image_name = Some(read_text_field(field).await?);
            }
            "category" => {
                data.category = Some(read_text_field(field).await?);
            }
            field_name => {
                tracing::warn!("Unexpected form field: {}", field_name);
            }
        }
    }

    Ok(data)
}

async fn read_text_field(field: Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}
