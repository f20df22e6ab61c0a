//! # localize-client
//!
//! HTTP transport and the translation loader for localize.

pub mod http;
pub mod loader;

pub use http::HttpTransport;
pub use loader::TranslationLoader;
