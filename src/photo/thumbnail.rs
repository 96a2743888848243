use iced::widget::image::Handle;
use image::{imageops::FilterType, ImageResult};
use std::path::Path;
use tracing::{debug, warn};

/// Decoded thumbnail pixels, ready for the image widget
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

impl Thumbnail {
    /// Wrap raw RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            handle: Handle::from_rgba(width, height, pixels),
        }
    }
}

/// Decode a photo and shrink it to fit a `size`×`size` box
pub fn load_thumbnail(path: &Path, size: u32) -> ImageResult<Thumbnail> {
    let img = image::open(path)?;

    // Never upscale small photos
    let thumbnail = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = thumbnail.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Thumbnail::from_rgba(width, height, rgba.into_raw()))
}

/// Decode a thumbnail for a record's path.
/// Returns None if the file is missing or not an image; the record is kept anyway.
pub fn decode_thumbnail(file_path: &str, size: u32) -> Option<Thumbnail> {
    match load_thumbnail(Path::new(file_path), size) {
        Ok(thumbnail) => {
            debug!(
                "📸 Decoded thumbnail {}x{} for {}",
                thumbnail.width, thumbnail.height, file_path
            );
            Some(thumbnail)
        }
        Err(e) => {
            warn!("Could not decode thumbnail for {:?}: {}", file_path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_thumbnail_fits_box() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.jpg");
        RgbImage::from_pixel(400, 200, Rgb([200, 120, 40]))
            .save(&path)
            .unwrap();

        let thumb = decode_thumbnail(path.to_str().unwrap(), 96).unwrap();
        assert_eq!(thumb.width, 96);
        assert_eq!(thumb.height, 48);
    }

    #[test]
    fn test_small_photo_is_not_upscaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.jpg");
        RgbImage::new(10, 20).save(&path).unwrap();

        let thumb = decode_thumbnail(path.to_str().unwrap(), 96).unwrap();
        assert_eq!((thumb.width, thumb.height), (10, 20));
    }

    #[test]
    fn test_missing_file_has_no_thumbnail() {
        assert!(decode_thumbnail("/nonexistent/Selfie_1.jpg", 96).is_none());
        assert!(decode_thumbnail("", 96).is_none());
    }

    #[test]
    fn test_garbage_file_has_no_thumbnail() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        assert!(decode_thumbnail(path.to_str().unwrap(), 96).is_none());
    }
}
