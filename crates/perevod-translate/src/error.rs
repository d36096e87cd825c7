use perevod_core::languages::LanguageCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unsupported language pair: {from} → {to}")]
    UnsupportedLanguagePair { from: LanguageCode, to: LanguageCode },

    #[error("rate limited by translation service: {0}")]
    RateLimit(String),

    #[error("unexpected response from translation service: {0}")]
    InvalidResponse(String),

    #[error("text to translate must not be empty")]
    EmptyText,

    #[error("translation client misconfigured: {0}")]
    Config(String),
}

impl TranslateError {
    /// Whether repeating the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimit(_))
    }
}
