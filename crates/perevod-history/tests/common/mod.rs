#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use perevod_history::HistoryStore;
use perevod_storage::MemoryAdapter;
use perevod_translate::{
    BoxFuture, TranslateError, TranslationClient, TranslationRequest, TranslationResponse,
};

/// A store and the adapter behind it, so tests can inject faults.
pub fn memory_store() -> (Arc<MemoryAdapter>, HistoryStore) {
    let adapter = Arc::new(MemoryAdapter::new());
    let store = HistoryStore::new(adapter.clone());
    (adapter, store)
}

/// Replies from a queue; falls back to upper-casing the input when empty.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, TranslateError>>>,
    seen: Mutex<Vec<TranslationRequest>>,
}

impl ScriptedClient {
    pub fn push_ok(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_err(&self, err: TranslateError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl TranslationClient for ScriptedClient {
    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<TranslationResponse, TranslateError>> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(request.text.to_uppercase()));
            reply.map(|translated_text| TranslationResponse { translated_text })
        })
    }
}
