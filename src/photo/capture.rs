//! Capturing a selfie on the desktop
//!
//! There is no camera intent here: the user picks an existing photo and it
//! is copied into the pictures directory under a fresh `Selfie_` name. The
//! copy's absolute path is the capture result.

use chrono::{Local, NaiveDateTime};
use rfd::FileDialog;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// chrono pattern for `yyyyMMdd_HHmmss`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Give up looking for a free file name after this many attempts
const MAX_NAME_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to create pictures dir {path}: {source}")]
    PicturesDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {from} into {to}: {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    #[error("no free selfie file name left in {0}")]
    NamesExhausted(String),
}

/// Format a capture time the way record timestamps are stored
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Timestamp for "now", in local wall-clock time
pub fn timestamp_now() -> String {
    format_timestamp(Local::now().naive_local())
}

/// Show the native picker for a photo to use as the new selfie.
/// Returns None when the user cancels.
pub fn pick_photo() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Choose Your Selfie")
        .add_filter("JPEG", &["jpg", "jpeg", "JPG", "JPEG"])
        .pick_file()
}

/// Reserve `Selfie_<timestamp>_<n>.jpg` in `pictures_dir`, n counting from 1.
///
/// The file is created exclusively so two captures in the same second never
/// share a name.
pub fn create_image_file(pictures_dir: &Path, timestamp: &str) -> Result<PathBuf, CaptureError> {
    fs::create_dir_all(pictures_dir).map_err(|source| CaptureError::PicturesDir {
        path: pictures_dir.display().to_string(),
        source,
    })?;

    for n in 1..=MAX_NAME_ATTEMPTS {
        let candidate = pictures_dir.join(format!("Selfie_{}_{}.jpg", timestamp, n));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => {
                return Err(CaptureError::PicturesDir {
                    path: candidate.display().to_string(),
                    source,
                })
            }
        }
    }

    Err(CaptureError::NamesExhausted(pictures_dir.display().to_string()))
}

/// Copy `source` into the pictures directory as a new selfie file.
/// Returns the absolute path of the copy.
pub fn import_photo(source: &Path, pictures_dir: &Path) -> Result<PathBuf, CaptureError> {
    let target = create_image_file(pictures_dir, &timestamp_now())?;

    if let Err(e) = fs::copy(source, &target) {
        // Don't leave the reserved empty file behind
        let _ = fs::remove_file(&target);
        return Err(CaptureError::Copy {
            from: source.display().to_string(),
            to: target.display().to_string(),
            source: e,
        });
    }

    let target = fs::canonicalize(&target).unwrap_or(target);
    info!("📷 Captured selfie: {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_timestamp_format() {
        let time = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(format_timestamp(time), "20230101_130509");
    }

    #[test]
    fn test_timestamp_now_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
        assert!(NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_image_file_names_are_unique() {
        let dir = tempdir().unwrap();
        let pictures = dir.path().join("Pictures");

        let first = create_image_file(&pictures, "20230101_120000").unwrap();
        let second = create_image_file(&pictures, "20230101_120000").unwrap();

        assert_eq!(first.file_name().unwrap(), "Selfie_20230101_120000_1.jpg");
        assert_eq!(second.file_name().unwrap(), "Selfie_20230101_120000_2.jpg");
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn test_import_copies_photo() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("me.jpg");
        fs::write(&source, b"jpeg bytes").unwrap();
        let pictures = dir.path().join("Pictures");

        let copied = import_photo(&source, &pictures).unwrap();

        assert!(copied.is_absolute());
        assert!(copied
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Selfie_"));
        assert_eq!(fs::read(&copied).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_import_missing_source_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let pictures = dir.path().join("Pictures");

        let result = import_photo(&dir.path().join("nope.jpg"), &pictures);

        assert!(matches!(result, Err(CaptureError::Copy { .. })));
        assert_eq!(fs::read_dir(&pictures).unwrap().count(), 0);
    }
}
