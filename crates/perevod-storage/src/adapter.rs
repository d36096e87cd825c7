use std::future::Future;
use std::pin::Pin;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Durable key-value storage for serialized state.
///
/// Implementations must make `set` atomic: a reader sees either the previous
/// value or the new one, never a partial write.
pub trait PersistenceAdapter: Send + Sync {
    /// Read the bytes stored under `key`. `None` = nothing stored yet.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<Vec<u8>>, StorageError>>;

    /// Replace the bytes stored under `key`. Success means the value survives
    /// a process restart.
    fn set<'a>(&'a self, key: &'a str, value: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>>;
}
