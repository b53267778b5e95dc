//! Client-uploaded media processing.
//!
//! Images are re-encoded to JPEG with a bounded dimension and a target
//! output size; videos pass through untouched. Both size limits are checked
//! before any decode work starts.

use chrono::{DateTime, Datelike, Utc};
use std::io::Cursor;

use crate::core::error::{AppError, Result};
use crate::shared::validation::sanitize_caption;

/// Hard limit for images before re-encoding
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Hard limit for videos (passed through unchanged)
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

/// Longest edge after re-encoding
pub const MAX_IMAGE_DIMENSION: u32 = 1920;

/// Target ceiling for re-encoded images
pub const TARGET_IMAGE_BYTES: usize = 1024 * 1024;

/// Quality steps tried in order until the output fits the target.
/// The last step is the floor; its result is used even if still over.
const JPEG_QUALITY_LADDER: [u8; 6] = [85, 75, 65, 55, 45, 40];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Classify an upload by MIME type; anything but image/video is rejected
pub fn classify(content_type: &str) -> Option<MediaKind> {
    if content_type.starts_with("image/") {
        Some(MediaKind::Image)
    } else if content_type.starts_with("video/") {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Fail fast on oversized input, before any decode work happens
pub fn validate_size(kind: MediaKind, size: usize) -> Result<()> {
    match kind {
        MediaKind::Image if size > MAX_IMAGE_BYTES => Err(AppError::Validation(format!(
            "Image too large: {} bytes (maximum {} MB)",
            size,
            MAX_IMAGE_BYTES / 1024 / 1024
        ))),
        MediaKind::Video if size > MAX_VIDEO_BYTES => Err(AppError::Validation(format!(
            "Video too large: {} bytes (maximum {} MB)",
            size,
            MAX_VIDEO_BYTES / 1024 / 1024
        ))),
        _ => Ok(()),
    }
}

/// Output of the pipeline, ready for the object store
#[derive(Debug)]
pub struct ProcessedMedia {
    pub data: Vec<u8>,
    pub content_type: String,
    pub extension: String,
}

/// Run the pipeline on validated input
pub fn process(kind: MediaKind, data: Vec<u8>, content_type: &str) -> Result<ProcessedMedia> {
    match kind {
        MediaKind::Video => Ok(ProcessedMedia {
            data,
            content_type: content_type.to_string(),
            extension: video_extension(content_type).to_string(),
        }),
        MediaKind::Image => {
            let jpeg = compress_image(&data)?;
            Ok(ProcessedMedia {
                data: jpeg,
                content_type: "image/jpeg".to_string(),
                extension: "jpg".to_string(),
            })
        }
    }
}

/// Re-encode an image as JPEG, bounding the longest edge and stepping the
/// quality down until the output fits the target size.
fn compress_image(data: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::BadRequest(format!("Invalid image data: {}", e)))?;

    // thumbnail keeps aspect ratio and never upscales
    let img = if img.width() > MAX_IMAGE_DIMENSION || img.height() > MAX_IMAGE_DIMENSION {
        img.thumbnail(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION)
    } else {
        img
    };

    // JPEG has no alpha channel
    let img = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut out = Vec::new();
    for quality in JPEG_QUALITY_LADDER {
        out.clear();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), quality);
        img.write_with_encoder(encoder)
            .map_err(|e| AppError::Internal(format!("Failed to encode image: {}", e)))?;

        if out.len() <= TARGET_IMAGE_BYTES {
            break;
        }
    }

    Ok(out)
}

fn video_extension(content_type: &str) -> &'static str {
    match content_type {
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => "bin",
    }
}

/// Derive the stored filename and object path.
///
/// The filename combines the sanitized caption with a timestamp suffix; the
/// path places it under year/month of the submission time.
pub fn object_path(caption: &str, extension: &str, now: DateTime<Utc>) -> (String, String) {
    let slug = sanitize_caption(caption);
    let filename = format!("{}_{}.{}", slug, now.format("%Y%m%d_%H%M%S"), extension);
    let path = format!("{}/{:02}/{}", now.year(), now.month(), filename);
    (filename, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_image(width: u32, height: u32) -> Vec<u8> {
        use image::{ImageBuffer, Rgb};

        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_classify_by_mime_type() {
        assert_eq!(classify("image/png"), Some(MediaKind::Image));
        assert_eq!(classify("image/jpeg"), Some(MediaKind::Image));
        assert_eq!(classify("video/mp4"), Some(MediaKind::Video));
        assert_eq!(classify("application/pdf"), None);
        assert_eq!(classify("text/plain"), None);
    }

    #[test]
    fn test_image_size_limit() {
        // 9 MB is accepted, 11 MB is rejected before any decode
        assert!(validate_size(MediaKind::Image, 9 * 1024 * 1024).is_ok());
        assert!(validate_size(MediaKind::Image, 11 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_video_size_limit() {
        assert!(validate_size(MediaKind::Video, 40 * 1024 * 1024).is_ok());
        assert!(validate_size(MediaKind::Video, 60 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_video_passes_through_unchanged() {
        let data = vec![0x42u8; 4096];
        let processed = process(MediaKind::Video, data.clone(), "video/mp4").unwrap();

        assert_eq!(processed.data, data);
        assert_eq!(processed.content_type, "video/mp4");
        assert_eq!(processed.extension, "mp4");
    }

    #[test]
    fn test_image_is_reencoded_to_jpeg() {
        let png = create_test_image(64, 64);
        let processed = process(MediaKind::Image, png, "image/png").unwrap();

        assert_eq!(processed.content_type, "image/jpeg");
        assert_eq!(processed.extension, "jpg");
        let decoded = image::load_from_memory(&processed.data).unwrap();
        assert_eq!(decoded.width(), 64);
    }

    #[test]
    fn test_oversized_dimensions_are_bounded() {
        let png = create_test_image(4000, 100);
        let processed = process(MediaKind::Image, png, "image/png").unwrap();

        let decoded = image::load_from_memory(&processed.data).unwrap();
        assert!(decoded.width() <= MAX_IMAGE_DIMENSION);
        assert!(decoded.height() <= MAX_IMAGE_DIMENSION);
        // Aspect ratio preserved: 40:1 stays wide
        assert!(decoded.width() > decoded.height());
    }

    #[test]
    fn test_garbage_image_data_is_rejected() {
        let err = process(MediaKind::Image, vec![0u8; 128], "image/png").unwrap_err();
        assert!(err.to_string().contains("Invalid image data"));
    }

    #[test]
    fn test_object_path_derivation() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 0).unwrap();
        let (filename, path) = object_path("Recibo de Juan", "jpg", now);

        assert_eq!(filename, "recibo-de-juan_20260807_143000.jpg");
        assert_eq!(path, "2026/08/recibo-de-juan_20260807_143000.jpg");
    }

    #[test]
    fn test_object_path_with_empty_caption() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let (filename, path) = object_path("", "mp4", now);

        assert_eq!(filename, "archivo_20260102_030405.mp4");
        assert!(path.starts_with("2026/01/"));
    }
}
