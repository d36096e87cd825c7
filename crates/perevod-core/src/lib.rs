//! perevod-core
//!
//! Pure domain types, the supported-language table, and storage key conventions.
//! No I/O; this is the shared vocabulary of the perevod workspace.

pub mod error;
pub mod keys;
pub mod languages;
pub mod models;
