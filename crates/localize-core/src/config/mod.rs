mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::LocalizeError;
use crate::store::TranslationStore;
use crate::types::{LanguageCode, TranslationSet};
use defaults::*;

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "LOCALIZE_API_KEY";

/// Top-level localize configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub localize: LocalizeConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub translations: TranslationsConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizeConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Translation API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Project API key, sent as the `apikey` query parameter. Absent = downloads
    /// are refused.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra headers sent with every request; they override the defaults.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
        }
    }
}

impl ApiConfig {
    /// Replace the configured key with `key` when it is non-empty.
    pub fn override_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }
}

/// Language selection and seed data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsConfig {
    #[serde(default = "default_language")]
    pub language: LanguageCode,
    #[serde(default)]
    pub fallback_language: Option<LanguageCode>,
    /// Languages to download when none are named explicitly. Empty = all.
    #[serde(default)]
    pub languages: Vec<LanguageCode>,
    /// Pin downloads to this snapshot version.
    #[serde(default)]
    pub snapshot: Option<String>,
    /// Tables available before anything is downloaded.
    #[serde(default)]
    pub initial: TranslationSet,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            fallback_language: None,
            languages: Vec::new(),
            snapshot: None,
            initial: TranslationSet::new(),
        }
    }
}

impl TranslationsConfig {
    /// Build a store seeded from this section.
    pub fn build_store(&self) -> TranslationStore {
        TranslationStore::new(
            self.initial.clone(),
            self.language.clone(),
            self.fallback_language.clone(),
        )
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. `LOCALIZE_API_KEY`
/// overrides the configured API key.
pub fn load(path: &str) -> Result<Config, LocalizeError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LocalizeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse(&content)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    config
        .api
        .override_api_key(std::env::var(API_KEY_ENV).ok());
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, LocalizeError> {
    toml::from_str(content)
        .map_err(|e| LocalizeError::Config(format!("failed to parse config: {}", e)))
}
