use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("read failed for key {key}: {message}")]
    Read { key: String, message: String },

    #[error("write failed for key {key}: {message}")]
    Write { key: String, message: String },
}

/// Keys become file names in [`crate::FileAdapter`], so every adapter
/// applies the same rule: non-empty, no path separators, no `..`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
