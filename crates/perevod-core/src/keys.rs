//! Persistence key conventions.
//!
//! Pure string constants with no adapter dependency. Every persistence adapter
//! stores values under these keys.

/// The full translation history, serialized as one JSON document.
pub const HISTORY: &str = "history";

/// Current layout version of the document stored under [`HISTORY`].
pub const HISTORY_VERSION: u32 = 1;
