//! The translation history store.
//!
//! # Ownership
//!
//! `HistoryStore` is the only owner of the record sequence. The UI layer reads
//! snapshots through the `list_*` / `find` queries and changes state only
//! through the mutating operations below.
//!
//! # Durability and rollback
//!
//! Every mutation works on a copy of the sequence. The copy is encoded and
//! written to the [`PersistenceAdapter`] first; only after the write succeeds
//! does it replace the in-memory sequence. A failed write therefore leaves
//! the store exactly as it was, and the error is returned to the caller.
//!
//! # Serialization of writers
//!
//! Mutations queue on an async write gate held across the adapter write, so
//! two overlapping calls can never both start from the same snapshot and lose
//! one update. Reads take a short synchronous lock and never wait on I/O.
//!
//! # Loading
//!
//! State is loaded lazily: the first mutation loads from the adapter if
//! [`HistoryStore::load`] has not been called yet. A corrupt document is
//! reported as [`HistoryError::CorruptState`] and the store continues with
//! an empty history; the next successful write replaces the corrupt bytes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use perevod_core::keys;
use perevod_core::languages::LanguageCode;
use perevod_core::models::history::HistoryDocument;
use perevod_core::models::record::TranslationRecord;
use perevod_storage::PersistenceAdapter;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::HistoryError;
use crate::events::{HistoryEvent, Listeners, Subscription};

pub struct HistoryStore {
    adapter: Arc<dyn PersistenceAdapter>,
    /// Insertion order, oldest first.
    records: RwLock<Vec<TranslationRecord>>,
    loaded: AtomicBool,
    write_gate: Mutex<()>,
    listeners: Arc<Listeners>,
}

impl HistoryStore {
    /// Create an unloaded store backed by `adapter`. Nothing is read until
    /// [`HistoryStore::load`] or the first mutation.
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self {
            adapter,
            records: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
            write_gate: Mutex::new(()),
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// Create a store and load it immediately.
    ///
    /// A corrupt document is not fatal here: the store comes back empty
    /// alongside the `CorruptState` error so the caller can report it.
    /// Read failures are returned as errors with no store.
    pub async fn open(
        adapter: Arc<dyn PersistenceAdapter>,
    ) -> Result<(Self, Option<HistoryError>), HistoryError> {
        let store = Self::new(adapter);
        match store.load().await {
            Ok(()) => Ok((store, None)),
            Err(e @ HistoryError::CorruptState(_)) => Ok((store, Some(e))),
            Err(e) => Err(e),
        }
    }

    // ── Loading ──────────────────────────────────────────────────────────

    /// Replace in-memory state with what the adapter holds.
    ///
    /// - nothing stored → empty history
    /// - unparseable → empty history and `CorruptState`
    /// - read failure → `Persistence`, in-memory state untouched
    pub async fn load(&self) -> Result<(), HistoryError> {
        let _gate = self.write_gate.lock().await;
        self.load_locked().await
    }

    async fn load_locked(&self) -> Result<(), HistoryError> {
        let stored = self.adapter.get(keys::HISTORY).await?;

        let records = match stored {
            None => {
                debug!("no stored history, starting empty");
                Vec::new()
            }
            Some(bytes) => match HistoryDocument::decode(&bytes) {
                Ok(doc) => doc.records,
                Err(e) => {
                    error!(error = %e, bytes = bytes.len(), "stored history is corrupt, starting empty");
                    *self.write_records() = Vec::new();
                    self.loaded.store(true, Ordering::SeqCst);
                    return Err(HistoryError::CorruptState(e.to_string()));
                }
            },
        };

        let count = records.len();
        *self.write_records() = records;
        self.loaded.store(true, Ordering::SeqCst);
        info!(count, "history loaded");
        self.listeners.notify(&HistoryEvent::Loaded { count });
        Ok(())
    }

    async fn ensure_loaded_locked(&self) -> Result<(), HistoryError> {
        if self.loaded.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.load_locked().await
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Append a new record for a successful translation and persist it.
    ///
    /// The record gets a fresh id and the current time once it reaches the
    /// front of the write queue, so `created_at` follows insertion order.
    pub async fn record_translation(
        &self,
        source_lang: LanguageCode,
        target_lang: LanguageCode,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Result<TranslationRecord, HistoryError> {
        let source_text = source_text.into();
        let translated_text = translated_text.into();
        if source_text.trim().is_empty() || translated_text.trim().is_empty() {
            return Err(HistoryError::EmptyText);
        }

        self.mutate(move |records| {
            let record =
                TranslationRecord::new(source_lang, target_lang, source_text, translated_text)
                    .map_err(|_| HistoryError::EmptyText)?;
            records.push(record.clone());
            Ok((record.clone(), HistoryEvent::Recorded(record)))
        })
        .await
        .inspect(|record| {
            info!(
                id = %record.id(),
                from = %record.source_lang(),
                to = %record.target_lang(),
                "translation recorded"
            );
        })
    }

    /// Flip the favorite flag of record `id` and persist it.
    pub async fn toggle_favorite(&self, id: Uuid) -> Result<TranslationRecord, HistoryError> {
        self.mutate(move |records| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(HistoryError::NotFound { id })?;
            record.toggle_favorite();
            let updated = record.clone();
            Ok((updated.clone(), HistoryEvent::FavoriteToggled(updated)))
        })
        .await
        .inspect(|record| info!(id = %id, favorite = record.is_favorite(), "favorite toggled"))
    }

    /// Remove record `id`. Deleting an id that is not present, including one
    /// deleted earlier, fails with `NotFound`.
    pub async fn delete_record(&self, id: Uuid) -> Result<(), HistoryError> {
        self.mutate(move |records| {
            let index = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or(HistoryError::NotFound { id })?;
            records.remove(index);
            Ok(((), HistoryEvent::Deleted { id }))
        })
        .await
        .inspect(|_| info!(id = %id, "record deleted"))
    }

    /// Drop every record and persist the empty history.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        self.mutate(|records| {
            let removed = records.len();
            records.clear();
            debug!(removed, "clearing history");
            Ok(((), HistoryEvent::Cleared))
        })
        .await
        .inspect(|_| info!("history cleared"))
    }

    /// Apply `change` to a copy of the records, persist the copy, then swap
    /// it in and notify listeners. Any error leaves the store untouched.
    async fn mutate<T, F>(&self, change: F) -> Result<T, HistoryError>
    where
        T: Send,
        F: FnOnce(&mut Vec<TranslationRecord>) -> Result<(T, HistoryEvent), HistoryError> + Send,
    {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded_locked().await?;

        let mut next = self.read_records().clone();
        let (output, event) = change(&mut next)?;

        self.persist(&next).await?;
        *self.write_records() = next;

        self.listeners.notify(&event);
        Ok(output)
    }

    async fn persist(&self, records: &[TranslationRecord]) -> Result<(), HistoryError> {
        let bytes = HistoryDocument::new(records.to_vec())
            .encode()
            .map_err(|e| HistoryError::Encode(e.to_string()))?;

        let len = bytes.len();
        match self.adapter.set(keys::HISTORY, bytes).await {
            Ok(()) => {
                debug!(records = records.len(), bytes = len, "history persisted");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "history write failed, change rolled back");
                Err(e.into())
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// All records, most recent first.
    pub fn list_all(&self) -> Vec<TranslationRecord> {
        self.read_records().iter().rev().cloned().collect()
    }

    /// Favorite records, most recent first.
    pub fn list_favorites(&self) -> Vec<TranslationRecord> {
        self.read_records()
            .iter()
            .rev()
            .filter(|r| r.is_favorite())
            .cloned()
            .collect()
    }

    pub fn find(&self, id: Uuid) -> Option<TranslationRecord> {
        self.read_records().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_records().is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────────

    /// Register `listener` to be called synchronously after every
    /// successful load or mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&HistoryEvent) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<TranslationRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<TranslationRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}
