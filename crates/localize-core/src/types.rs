//! Shared aliases for the translation data model.

use std::collections::HashMap;

/// Language identifier, e.g. `"en"` or `"pt-BR"`. Compared by exact match.
pub type LanguageCode = String;

/// Identifier of one localizable string.
pub type TranslationKey = String;

/// Key -> string map for one language.
pub type LanguageTable = HashMap<TranslationKey, String>;

/// Cumulative map of every loaded language's table.
pub type TranslationSet = HashMap<LanguageCode, LanguageTable>;

/// Active language used when none is set.
pub const DEFAULT_LANGUAGE: &str = "en";
