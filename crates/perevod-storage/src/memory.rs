use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::adapter::{BoxFuture, PersistenceAdapter};
use crate::error::{StorageError, validate_key};

/// Process-local adapter. Nothing survives a restart, but two stores sharing
/// one `MemoryAdapter` (behind an `Arc`) see each other's writes, which is
/// enough to simulate a reload.
///
/// Failures and latency can be injected to exercise callers' error paths.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    write_delay: Option<Duration>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set` sleeps for `delay` before landing.
    pub fn with_write_delay(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stored bytes for `key`, bypassing fault injection.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Overwrite `key` directly, bypassing fault injection.
    pub fn put_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.into());
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Vec<u8>>, StorageError>> {
        Box::pin(async move {
            validate_key(key)?;
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    message: "injected read failure".to_string(),
                });
            }
            Ok(self.raw(key))
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            validate_key(key)?;
            if let Some(delay) = self.write_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    message: "injected write failure".to_string(),
                });
            }

            self.put_raw(key, value);
            self.writes.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(key, "value written to memory");
            Ok(())
        })
    }
}
