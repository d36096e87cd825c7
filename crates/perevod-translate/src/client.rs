use std::future::Future;
use std::pin::Pin;

use perevod_core::languages::LanguagePair;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One translation request: the text and the direction to translate it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub pair: LanguagePair,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, pair: LanguagePair) -> Self {
        Self {
            text: text.into(),
            pair,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
}

/// A remote (or fake) translation backend.
///
/// Implementations never retry; a failure is returned as-is and the caller
/// decides what to do with it.
pub trait TranslationClient: Send + Sync {
    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<TranslationResponse, TranslateError>>;
}
