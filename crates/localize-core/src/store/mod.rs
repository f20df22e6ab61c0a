//! In-memory translation store with fallback resolution.
//!
//! The store owns every loaded language table plus the resolved view: the
//! fallback language's table overlaid with the active language's table.
//! Every mutator recomputes the resolved view before returning, so a reader
//! never observes it out of sync with the tables and the two language
//! settings.
//!
//! Tables are only written by [`TranslationStore::merge_language`] and
//! [`TranslationStore::merge_snapshot`]. A merge replaces a language's table
//! wholesale; it never accumulates keys from a previous table.


use tracing::debug;

use crate::types::{LanguageCode, LanguageTable, TranslationSet, DEFAULT_LANGUAGE};

/// Per-language string tables and the derived active view.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    translations: TranslationSet,
    language: LanguageCode,
    fallback_language: Option<LanguageCode>,
    resolved: LanguageTable,
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new(TranslationSet::new(), DEFAULT_LANGUAGE, None)
    }
}

impl TranslationStore {
    /// Create a store seeded with `initial` tables.
    pub fn new(
        initial: TranslationSet,
        language: impl Into<LanguageCode>,
        fallback_language: Option<LanguageCode>,
    ) -> Self {
        let mut store = Self {
            translations: initial,
            language: normalize_language(language.into()),
            fallback_language: normalize_fallback(fallback_language),
            resolved: LanguageTable::new(),
        };
        store.recompute();
        store
    }

    /// Current active language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current fallback language, if any.
    pub fn fallback_language(&self) -> Option<&str> {
        self.fallback_language.as_deref()
    }

    /// Switch the active language. An empty code selects the default ("en").
    ///
    /// The language does not need to be loaded yet; lookups fall through to
    /// the fallback table or to the raw key until it is.
    pub fn set_language(&mut self, code: impl Into<LanguageCode>) {
        self.language = normalize_language(code.into());
        self.recompute();
    }

    /// Switch or clear the fallback language.
    pub fn set_fallback_language(&mut self, code: Option<LanguageCode>) {
        self.fallback_language = normalize_fallback(code);
        self.recompute();
    }

    /// Replace the table for `code`, leaving every other language untouched.
    pub fn merge_language(&mut self, code: impl Into<LanguageCode>, table: LanguageTable) {
        let code = code.into();
        let affects_view = self.is_in_chain(&code);
        debug!("store: replacing table {code} ({} keys)", table.len());
        self.translations.insert(code, table);
        if affects_view {
            self.recompute();
        }
    }

    /// Replace the table of every language present in `tables` as one batch.
    ///
    /// The resolved view is recomputed once, after all tables are in place.
    pub fn merge_snapshot(&mut self, tables: TranslationSet) {
        if tables.is_empty() {
            return;
        }
        let mut affects_view = false;
        for (code, table) in tables {
            affects_view |= self.is_in_chain(&code);
            debug!("store: replacing table {code} ({} keys)", table.len());
            self.translations.insert(code, table);
        }
        if affects_view {
            self.recompute();
        }
    }

    /// Look `key` up through the active -> fallback chain.
    ///
    /// A missing key yields the key itself.
    pub fn resolve(&self, key: &str) -> String {
        match self.resolved.get(key) {
            Some(value) => value.clone(),
            None => self.unlocalized(key),
        }
    }

    /// Look `key` up in exactly `code`'s table, with no fallback chain.
    pub fn resolve_for(&self, key: &str, code: &str) -> String {
        match self.translations.get(code).and_then(|t| t.get(key)) {
            Some(value) => value.clone(),
            None => self.unlocalized(key),
        }
    }

    /// Placeholder returned for a key no table provides: the key verbatim.
    pub fn unlocalized(&self, key: &str) -> String {
        key.to_string()
    }

    /// The resolved (fallback-merged) view of the active language.
    pub fn resolved(&self) -> &LanguageTable {
        &self.resolved
    }

    /// Every loaded language table.
    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    /// The table for one language, if loaded.
    pub fn table(&self, code: &str) -> Option<&LanguageTable> {
        self.translations.get(code)
    }

    /// Loaded language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn is_in_chain(&self, code: &str) -> bool {
        code == self.language || self.fallback_language.as_deref() == Some(code)
    }

    fn recompute(&mut self) {
        self.resolved = build_view(
            &self.translations,
            &self.language,
            self.fallback_language.as_deref(),
        );
    }
}

/// Overlay the active table on top of the fallback table.
fn build_view(
    translations: &TranslationSet,
    language: &str,
    fallback_language: Option<&str>,
) -> LanguageTable {
    let mut view = fallback_language
        .and_then(|code| translations.get(code))
        .cloned()
        .unwrap_or_default();
    if let Some(active) = translations.get(language) {
        view.extend(active.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    view
}

fn normalize_language(code: LanguageCode) -> LanguageCode {
    if code.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        code
    }
}

fn normalize_fallback(code: Option<LanguageCode>) -> Option<LanguageCode> {
    code.filter(|c| !c.is_empty())
}
