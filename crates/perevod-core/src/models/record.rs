use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::languages::LanguageCode;

/// One stored translation result.
///
/// Everything except `is_favorite` is write-once: fields are private and the
/// only mutator is [`TranslationRecord::toggle_favorite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    id: Uuid,
    source_lang: LanguageCode,
    target_lang: LanguageCode,
    source_text: String,
    translated_text: String,
    created_at: jiff::Timestamp,
    is_favorite: bool,
}

impl TranslationRecord {
    /// Create a fresh, non-favorite record with a new v4 id stamped now.
    ///
    /// Both texts must contain something other than whitespace. They are
    /// stored as given, untrimmed.
    pub fn new(
        source_lang: LanguageCode,
        target_lang: LanguageCode,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let source_text = source_text.into();
        let translated_text = translated_text.into();
        if source_text.trim().is_empty() || translated_text.trim().is_empty() {
            return Err(CoreError::EmptyText);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            source_lang,
            target_lang,
            source_text,
            translated_text,
            created_at: jiff::Timestamp::now(),
            is_favorite: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_lang(&self) -> LanguageCode {
        self.source_lang
    }

    pub fn target_lang(&self) -> LanguageCode {
        self.target_lang
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}
