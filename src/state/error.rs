use thiserror::Error;

/// Errors raised by the selfie list store.
///
/// None of these reach the user: the session logs them and carries on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
