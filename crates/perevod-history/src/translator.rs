use std::sync::Arc;

use perevod_core::languages::LanguagePair;
use perevod_core::models::record::TranslationRecord;
use perevod_translate::{TranslateError, TranslationClient, TranslationRequest};
use tracing::{debug, warn};

use crate::error::TranslatorError;
use crate::store::HistoryStore;

/// Translate text and record the result in the history.
///
/// Client errors come back unmodified as [`TranslatorError::Translate`] and
/// leave the history untouched. Retrying is up to the caller.
pub struct Translator {
    client: Arc<dyn TranslationClient>,
    history: Arc<HistoryStore>,
}

impl Translator {
    pub fn new(client: Arc<dyn TranslationClient>, history: Arc<HistoryStore>) -> Self {
        Self { client, history }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Surrounding whitespace is stripped before sending; blank input fails
    /// with `TranslateError::EmptyText` without contacting the service.
    pub async fn translate(
        &self,
        text: &str,
        pair: LanguagePair,
    ) -> Result<TranslationRecord, TranslatorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyText.into());
        }

        let request = TranslationRequest::new(text, pair);
        let response = self.client.translate(&request).await.inspect_err(|e| {
            warn!(error = %e, from = %pair.from, to = %pair.to, "translation failed");
        })?;
        debug!(chars = response.translated_text.chars().count(), "translation received");

        let record = self
            .history
            .record_translation(pair.from, pair.to, request.text, response.translated_text)
            .await?;
        Ok(record)
    }
}
