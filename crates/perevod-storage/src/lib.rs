//! perevod-storage
//!
//! Asynchronous key-value persistence. Thin adapters behind one trait so the
//! history store never knows where its bytes live.

pub mod adapter;
pub mod error;
pub mod file;
pub mod memory;

pub use adapter::{BoxFuture, PersistenceAdapter};
pub use file::FileAdapter;
pub use memory::MemoryAdapter;
