//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the list store and the UI layer.

use std::fmt;

use crate::photo::thumbnail::Thumbnail;

/// A single captured selfie
///
/// `timestamp` and `file_path` are fixed at construction. The thumbnail is
/// derived from `file_path` and is never written to the list file.
#[derive(Debug, Clone)]
pub struct SelfieRecord {
    /// Capture time, formatted `yyyyMMdd_HHmmss`
    timestamp: String,
    /// Absolute path to the JPEG on disk (not validated)
    file_path: String,
    /// Decoded thumbnail, None if the file could not be decoded
    thumbnail: Option<Thumbnail>,
}

impl SelfieRecord {
    /// Build a record. No validation is done on either field.
    pub fn new(
        timestamp: impl Into<String>,
        file_path: impl Into<String>,
        thumbnail: Option<Thumbnail>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            file_path: file_path.into(),
            thumbnail,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}

/// Records are identified by what gets persisted; thumbnails are derived.
impl PartialEq for SelfieRecord {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.file_path == other.file_path
    }
}

impl Eq for SelfieRecord {}

/// Serialized form: the timestamp line followed by the path line.
impl fmt::Display for SelfieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.timestamp, self.file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_is_two_lines() {
        let record = SelfieRecord::new(
            "20230101_120000",
            "/home/me/Pictures/Selfie_20230101_120000_1.jpg",
            None,
        );

        assert_eq!(
            record.to_string(),
            "20230101_120000\n/home/me/Pictures/Selfie_20230101_120000_1.jpg"
        );
    }

    #[test]
    fn test_accepts_empty_fields() {
        let record = SelfieRecord::new("", "", None);
        assert_eq!(record.timestamp(), "");
        assert_eq!(record.file_path(), "");
        assert!(record.thumbnail().is_none());
    }

    #[test]
    fn test_equality_ignores_thumbnail() {
        let thumb = Thumbnail::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let a = SelfieRecord::new("20230101_120000", "/tmp/a.jpg", Some(thumb));
        let b = SelfieRecord::new("20230101_120000", "/tmp/a.jpg", None);
        let c = SelfieRecord::new("20230101_120001", "/tmp/a.jpg", None);

        assert_eq!(a, b);
        assert_ne!(b, c);
    }
}
