use thiserror::Error;

/// Top-level error type for localize.
#[derive(Debug, Error)]
pub enum LocalizeError {
    /// A download was requested without an API key.
    #[error("API key is required")]
    MissingApiKey,

    /// A single-language download was requested without a language code.
    #[error("Language is required")]
    MissingLanguage,

    /// The server answered with an `error` field in its payload.
    #[error("{0}")]
    Api(String),

    /// Network failure, timeout, bad status, or a body that is not JSON.
    #[error("transport error: {0}")]
    Transport(String),

    /// The JSON payload is not shaped as language -> key -> string.
    #[error("payload error: {0}")]
    Payload(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LocalizeError {
    /// Whether this error was raised before any request was issued.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::MissingLanguage)
    }
}
