//! perevod-translate
//!
//! The translation capability: a client trait, its error taxonomy, and an
//! HTTP implementation against the RapidAPI Translo service.

pub mod client;
pub mod error;
pub mod translo;

pub use client::{BoxFuture, TranslationClient, TranslationRequest, TranslationResponse};
pub use error::TranslateError;
pub use translo::{TransloClient, TransloConfig};
