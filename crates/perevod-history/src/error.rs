use perevod_storage::error::StorageError;
use perevod_translate::TranslateError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("record not found: {id}")]
    NotFound { id: Uuid },

    #[error("stored history is corrupt and was reset: {0}")]
    CorruptState(String),

    #[error("source and translated text must not be empty")]
    EmptyText,

    #[error("failed to encode history: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    History(#[from] HistoryError),
}
