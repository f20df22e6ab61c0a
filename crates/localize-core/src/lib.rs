//! # localize-core
//!
//! Core types, the translation store, transport traits, configuration, and
//! error handling for localize.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod payload;
pub mod store;
pub mod traits;
pub mod types;

pub use error::LocalizeError;
pub use store::TranslationStore;
