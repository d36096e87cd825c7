use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("history layout version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("malformed history document: {0}")]
    MalformedDocument(String),

    #[error("text must not be empty")]
    EmptyText,
}
