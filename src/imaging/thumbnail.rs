use std::fs;
use std::path::{Path, PathBuf};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use crate::errors::{ThumbnailError, ThumbnailResult};

/// Default edge lengths of generated thumbnails.
pub const DEFAULT_THUMBNAIL_SIZE: (u32, u32) = (200, 200);

/// Centre-crop and resize `source` to exactly `size`, writing the result to `destination`.
///
/// The output format follows the destination extension. Missing parent
/// directories of `destination` are created.
pub fn create_thumbnail(source: &Path, destination: &Path, size: (u32, u32)) -> ThumbnailResult<()> {
    if !source.is_file() {
        return Err(ThumbnailError::SourceNotFound(source.display().to_string()));
    }

    let original = image::open(source)?;
    let (width, height) = size;
    let thumbnail = original.resize_to_fill(width, height, FilterType::Lanczos3);

    let format = ImageFormat::from_path(destination)?;
    // JPEG has no alpha channel.
    let thumbnail = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(thumbnail.to_rgb8()),
        _ => thumbnail,
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    thumbnail.save_with_format(destination, format)?;
    Ok(())
}

/// Generate a thumbnail on the blocking pool.
///
/// Failures are logged and reported as `false`; callers decide whether to surface them.
pub async fn generate_thumbnail(source: PathBuf, destination: PathBuf, size: (u32, u32)) -> bool {
    tracing::info!("Generating thumbnail for: {}", source.display());
    tracing::debug!("Thumbnail will be saved at: {}", destination.display());

    let task_source = source.clone();
    let task_destination = destination.clone();
    let result = tokio::task::spawn_blocking(move || {
        create_thumbnail(&task_source, &task_destination, size)
    })
    .await
    .map_err(ThumbnailError::from)
    .and_then(|result| result);

    match result {
        Ok(()) => {
            tracing::info!("Thumbnail generated successfully: {}", destination.display());
            true
        }
        Err(ThumbnailError::SourceNotFound(path)) => {
            tracing::error!("Image file not found at {}", path);
            false
        }
        Err(e) => {
            tracing::error!("Error generating thumbnail for {}: {}", source.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgb, Rgba};
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 { Rgb([255u8, 0, 0]) } else { Rgb([0u8, 0, 255]) }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn output_is_exact_size_for_any_aspect_ratio() {
        let dir = TempDir::new().unwrap();
        for (i, (w, h)) in [(640, 480), (300, 900), (200, 200), (50, 20)].into_iter().enumerate() {
            let source = dir.path().join(format!("source_{}.png", i));
            let destination = dir.path().join(format!("thumb_{}.png", i));
            write_png(&source, w, h);

            create_thumbnail(&source, &destination, DEFAULT_THUMBNAIL_SIZE).unwrap();

            let thumb = image::open(&destination).unwrap();
            assert_eq!(thumb.dimensions(), (200, 200), "input {}x{}", w, h);
        }
    }

    #[test]
    fn crops_from_the_centre() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("wide.png");
        let destination = dir.path().join("wide_thumb.png");
        // Wide image: red outer thirds, green middle third.
        let img = ImageBuffer::from_fn(900, 300, |x, _| {
            if (300..600).contains(&x) { Rgb([0u8, 255, 0]) } else { Rgb([255u8, 0, 0]) }
        });
        img.save(&source).unwrap();

        create_thumbnail(&source, &destination, (100, 100)).unwrap();

        let thumb = image::open(&destination).unwrap().to_rgb8();
        let pixel = thumb.get_pixel(50, 50);
        assert!(pixel[1] > 200 && pixel[0] < 50, "expected green, got {:?}", pixel);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rock.png");
        let destination = dir.path().join("thumbnails/pebble/shiny/rock.png");
        write_png(&source, 64, 64);

        create_thumbnail(&source, &destination, (32, 32)).unwrap();
        assert!(destination.is_file());
    }

    #[test]
    fn jpeg_destination_drops_alpha() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("alpha.png");
        let destination = dir.path().join("alpha.jpg");
        ImageBuffer::from_pixel(40, 40, Rgba([10u8, 20, 30, 128])).save(&source).unwrap();

        create_thumbnail(&source, &destination, (20, 20)).unwrap();
        assert_eq!(image::open(&destination).unwrap().dimensions(), (20, 20));
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = create_thumbnail(
            &dir.path().join("nope.png"),
            &dir.path().join("out.png"),
            DEFAULT_THUMBNAIL_SIZE,
        )
        .unwrap_err();

        assert!(matches!(err, ThumbnailError::SourceNotFound(_)));
    }

    #[tokio::test]
    async fn generate_returns_false_on_failure() {
        let dir = TempDir::new().unwrap();
        let garbage = dir.path().join("garbage.png");
        fs::write(&garbage, b"not an image").unwrap();

        assert!(!generate_thumbnail(dir.path().join("nope.png"), dir.path().join("a.png"), (10, 10)).await);
        assert!(!generate_thumbnail(garbage, dir.path().join("b.png"), (10, 10)).await);
    }

    #[tokio::test]
    async fn generate_returns_true_on_success() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rock.png");
        let destination = dir.path().join("thumbs/rock.png");
        write_png(&source, 120, 80);

        assert!(generate_thumbnail(source, destination.clone(), DEFAULT_THUMBNAIL_SIZE).await);
        assert_eq!(image::open(destination).unwrap().dimensions(), (200, 200));
    }
}
