//! Full-screen display of a single selfie
//!
//! Camera photos are much larger than the window, so they are decoded and
//! then shrunk by an integer factor before being handed to the viewer.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::info;

/// A photo decoded for the current viewport
#[derive(Debug, Clone)]
pub struct DisplayImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
    /// Factor the original was divided by (1 = full size)
    pub scale_factor: u32,
}

/// Integer downscale factor for fitting a photo into a target area.
///
/// `min(photo_w / target_w, photo_h / target_h)`, never below 1, so photos
/// are never upscaled. A zero target dimension leaves that axis
/// unconstrained; if both are zero the photo is shown at full size.
pub fn scale_factor(photo_w: u32, photo_h: u32, target_w: u32, target_h: u32) -> u32 {
    let by_width = (target_w > 0).then(|| photo_w / target_w);
    let by_height = (target_h > 0).then(|| photo_h / target_h);

    let factor = match (by_width, by_height) {
        (Some(w), Some(h)) => w.min(h),
        (Some(w), None) => w,
        (None, Some(h)) => h,
        (None, None) => 1,
    };

    factor.max(1)
}

/// Decode a photo, shrunk to fit `target_w`×`target_h`.
///
/// Runs on a blocking thread since camera JPEGs take a while to decode.
pub async fn decode_for_viewport(
    path: PathBuf,
    target_w: u32,
    target_h: u32,
) -> Result<DisplayImage, String> {
    tokio::task::spawn_blocking(move || decode_for_viewport_blocking(&path, target_w, target_h))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking version of viewport decoding
fn decode_for_viewport_blocking(
    path: &Path,
    target_w: u32,
    target_h: u32,
) -> Result<DisplayImage, String> {
    // Read the header first, like a bounds-only decode
    let (photo_w, photo_h) = image::image_dimensions(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let factor = scale_factor(photo_w, photo_h, target_w, target_h);

    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    let img = if factor > 1 {
        img.resize_exact(
            (photo_w / factor).max(1),
            (photo_h / factor).max(1),
            FilterType::Triangle,
        )
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    info!(
        "🖼️  Decoded {} at {}x{} (1/{} of {}x{})",
        path.display(),
        width,
        height,
        factor,
        photo_w,
        photo_h
    );

    Ok(DisplayImage {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
        scale_factor: factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    #[test]
    fn test_scale_factor_takes_smaller_ratio() {
        // 4000/1000 = 4, 3000/1000 = 3
        assert_eq!(scale_factor(4000, 3000, 1000, 1000), 3);
        assert_eq!(scale_factor(3000, 4000, 1000, 1000), 3);
    }

    #[test]
    fn test_scale_factor_never_upscales() {
        assert_eq!(scale_factor(640, 480, 1920, 1080), 1);
        assert_eq!(scale_factor(0, 0, 100, 100), 1);
    }

    #[test]
    fn test_scale_factor_truncates() {
        // 1999/1000 = 1
        assert_eq!(scale_factor(1999, 5000, 1000, 1000), 1);
    }

    #[test]
    fn test_scale_factor_zero_targets() {
        assert_eq!(scale_factor(4000, 3000, 0, 0), 1);
        // Only the non-zero axis constrains
        assert_eq!(scale_factor(4000, 3000, 0, 500), 6);
        assert_eq!(scale_factor(4000, 3000, 1000, 0), 4);
    }

    #[tokio::test]
    async fn test_decode_downscales_to_viewport() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.jpg");
        RgbImage::new(800, 600).save(&path).unwrap();

        let shown = decode_for_viewport(path, 200, 200).await.unwrap();

        assert_eq!(shown.scale_factor, 3);
        assert_eq!((shown.width, shown.height), (266, 200));
    }

    #[tokio::test]
    async fn test_decode_keeps_small_photo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.jpg");
        RgbImage::new(100, 50).save(&path).unwrap();

        let shown = decode_for_viewport(path, 1024, 768).await.unwrap();

        assert_eq!(shown.scale_factor, 1);
        assert_eq!((shown.width, shown.height), (100, 50));
    }

    #[tokio::test]
    async fn test_decode_missing_file_is_error() {
        let result = decode_for_viewport(PathBuf::from("/nonexistent/Selfie.jpg"), 100, 100).await;
        assert!(result.is_err());
    }
}
