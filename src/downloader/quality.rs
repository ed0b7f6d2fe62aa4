//! Image quality gate and size-cap post-processing
//!
//! Downloaded bytes are only kept when they decode to an image of usable
//! size. Too-small images get deleted, oversized ones are downscaled in
//! place with high-quality resampling before they count as results.

use crate::config::DownloaderConfig;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs;
use std::path::Path;

/// Measurements of an image that passed the gate
#[derive(Debug, Clone, Copy)]
pub struct AcceptedImage {
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
}

/// Infers the saved file extension from a Content-Type header value
///
/// png, svg, webp, and gif are recognized; everything else (including a
/// missing header) is treated as jpg.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("png") {
        ".png"
    } else if content_type.contains("svg") {
        ".svg"
    } else if content_type.contains("webp") {
        ".webp"
    } else if content_type.contains("gif") {
        ".gif"
    } else {
        ".jpg"
    }
}

/// Applies the dimension policies to a freshly saved image
///
/// The file at `path` is decoded and checked: if either dimension is below
/// `min_dimension` the file is deleted and `None` returned; if the larger
/// dimension exceeds `max_dimension` the image is downscaled (aspect ratio
/// preserved, Lanczos3) and re-saved in place. A file that cannot be decoded
/// is deleted as well.
///
/// # Arguments
///
/// * `path` - The saved image file; must not be an SVG
/// * `config` - Dimension bounds and re-save quality
pub fn apply_quality_gate(path: &Path, config: &DownloaderConfig) -> Option<AcceptedImage> {
    let image = match decode(path) {
        Ok(image) => image,
        Err(e) => {
            tracing::debug!("Discarding {}: decode failed: {}", path.display(), e);
            remove_quietly(path);
            return None;
        }
    };

    let (width, height) = image.dimensions();

    if width < config.min_dimension || height < config.min_dimension {
        tracing::debug!(
            "Discarding {}: {}x{} below minimum {}px",
            path.display(),
            width,
            height,
            config.min_dimension
        );
        remove_quietly(path);
        return None;
    }

    let (width, height) = if width.max(height) > config.max_dimension {
        let resized = image.resize(
            config.max_dimension,
            config.max_dimension,
            FilterType::Lanczos3,
        );
        if let Err(e) = save(&resized, path, config.jpeg_quality) {
            tracing::debug!("Discarding {}: re-save failed: {}", path.display(), e);
            remove_quietly(path);
            return None;
        }
        resized.dimensions()
    } else {
        (width, height)
    };

    let byte_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    Some(AcceptedImage {
        width,
        height,
        byte_size,
    })
}

fn decode(path: &Path) -> image::ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Re-saves a downscaled image at its original path
///
/// JPEGs get an explicit quality setting; other formats use their encoder
/// defaults.
fn save(image: &DynamicImage, path: &Path, jpeg_quality: u8) -> image::ImageResult<()> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let file = fs::File::create(path).map_err(image::ImageError::IoError)?;
        let mut encoder = JpegEncoder::new_with_quality(file, jpeg_quality);
        // JPEG has no alpha channel
        encoder.encode_image(&image.to_rgb8())
    } else {
        image.save(path)
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!("Failed to remove {}: {}", path.display(), e);
    }
}
