//! perevod-history
//!
//! The translation history and favorites store, plus the translator service
//! that feeds it.

pub mod error;
pub mod events;
pub mod store;
pub mod translator;

pub use error::{HistoryError, TranslatorError};
pub use events::{HistoryEvent, Subscription};
pub use store::HistoryStore;
pub use translator::Translator;
