//! perevod-cli library root.
//!
//! Re-exports the config layer and the command implementations so that
//! integration tests can exercise them without going through argument
//! parsing.

pub mod app;
pub mod config;
pub mod render;
