//! Translation loader — drives downloads into a shared [`TranslationStore`].
//!
//! Each download issues exactly one request. Preconditions (API key,
//! language code) are checked before anything is sent; a failed
//! precondition never touches the loading flag.
//!
//! Overlapping downloads run concurrently. The loading flag stays raised
//! while at least one request is outstanding, merges land in completion
//! order, and callbacks fire in completion order. Nothing is retried or
//! cancelled.


use localize_core::{
    config::Config,
    endpoints, payload,
    error::LocalizeError,
    store::TranslationStore,
    traits::{Request, Transport},
    types::LanguageCode,
};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::{info, warn};

/// Shared in-flight counter and the signal derived from it.
struct LoadingState {
    in_flight: Mutex<usize>,
    signal: watch::Sender<bool>,
}

impl LoadingState {
    fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            in_flight: Mutex::new(0),
            signal,
        }
    }
}

/// Holds one unit of the in-flight count; lowering the flag on drop.
struct LoadingGuard {
    state: Arc<LoadingState>,
}

impl LoadingGuard {
    fn enter(state: &Arc<LoadingState>) -> Self {
        let mut n = state.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *n += 1;
        if *n == 1 {
            state.signal.send_replace(true);
        }
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut n = self
            .state
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *n = n.saturating_sub(1);
        if *n == 0 {
            self.state.signal.send_replace(false);
        }
    }
}

/// A download that passed its preconditions.
struct Prepared {
    request: Request,
    /// Languages to apply from the response; empty = all.
    scope: Vec<LanguageCode>,
    label: String,
}

/// Handle to a translation session: the store, its transport, and the
/// session's API key. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TranslationLoader {
    store: Arc<RwLock<TranslationStore>>,
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    loading: Arc<LoadingState>,
}

impl TranslationLoader {
    /// Create a loader around `store`. An empty `api_key` counts as absent.
    pub fn new(
        store: TranslationStore,
        transport: Arc<dyn Transport>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            transport,
            api_key: api_key.filter(|k| !k.is_empty()),
            loading: Arc::new(LoadingState::new()),
        }
    }

    /// Create from config values: seed data, languages, and API key.
    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::new(
            config.translations.build_store(),
            transport,
            config.api.api_key.clone(),
        )
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<TranslationStore>> {
        self.store.clone()
    }

    /// Read access to the store.
    pub fn read(&self) -> RwLockReadGuard<'_, TranslationStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TranslationStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn language(&self) -> String {
        self.read().language().to_string()
    }

    pub fn set_language(&self, code: impl Into<LanguageCode>) {
        self.write().set_language(code);
    }

    pub fn fallback_language(&self) -> Option<String> {
        self.read().fallback_language().map(String::from)
    }

    pub fn set_fallback_language(&self, code: Option<LanguageCode>) {
        self.write().set_fallback_language(code);
    }

    /// Resolve through the active -> fallback chain.
    pub fn resolve(&self, key: &str) -> String {
        self.read().resolve(key)
    }

    /// Resolve in exactly `code`'s table.
    pub fn resolve_for(&self, key: &str, code: &str) -> String {
        self.read().resolve_for(key, code)
    }

    /// Whether any download is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.signal.borrow()
    }

    /// Subscribe to loading flag changes.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.signal.subscribe()
    }

    // --- Callback API ---

    /// Download `codes` (all languages when empty) and merge every table in
    /// the response.
    ///
    /// Precondition failures invoke `callback` before this returns. Otherwise
    /// the loading flag is raised before this returns and the request runs on
    /// the current Tokio runtime; `callback` fires after the flag is lowered.
    pub fn download_languages<F>(&self, codes: &[LanguageCode], callback: F)
    where
        F: FnOnce(Option<LocalizeError>) + Send + 'static,
    {
        match self.prepare_languages(codes) {
            Ok(prepared) => self.spawn(prepared, callback),
            Err(e) => callback(Some(e)),
        }
    }

    /// Download a single language.
    pub fn download_language<F>(&self, code: &str, callback: F)
    where
        F: FnOnce(Option<LocalizeError>) + Send + 'static,
    {
        if code.is_empty() {
            callback(Some(LocalizeError::MissingLanguage));
            return;
        }
        self.download_languages(&[code.to_string()], callback);
    }

    /// Download snapshot `version`, merging only `codes` from the response
    /// (every language when empty).
    pub fn download_snapshot<F>(&self, version: &str, codes: &[LanguageCode], callback: F)
    where
        F: FnOnce(Option<LocalizeError>) + Send + 'static,
    {
        match self.prepare_snapshot(version, codes) {
            Ok(prepared) => self.spawn(prepared, callback),
            Err(e) => callback(Some(e)),
        }
    }

    // --- Async API ---

    /// Async form of [`Self::download_languages`].
    pub async fn fetch_languages(&self, codes: &[LanguageCode]) -> Result<(), LocalizeError> {
        let prepared = self.prepare_languages(codes)?;
        let _guard = LoadingGuard::enter(&self.loading);
        self.run(prepared).await
    }

    /// Async form of [`Self::download_language`].
    pub async fn fetch_language(&self, code: &str) -> Result<(), LocalizeError> {
        if code.is_empty() {
            return Err(LocalizeError::MissingLanguage);
        }
        self.fetch_languages(&[code.to_string()]).await
    }

    /// Async form of [`Self::download_snapshot`].
    pub async fn fetch_snapshot(
        &self,
        version: &str,
        codes: &[LanguageCode],
    ) -> Result<(), LocalizeError> {
        let prepared = self.prepare_snapshot(version, codes)?;
        let _guard = LoadingGuard::enter(&self.loading);
        self.run(prepared).await
    }

    // --- Internals ---

    fn api_key(&self) -> Result<&str, LocalizeError> {
        self.api_key
            .as_deref()
            .ok_or(LocalizeError::MissingApiKey)
    }

    fn prepare_languages(&self, codes: &[LanguageCode]) -> Result<Prepared, LocalizeError> {
        let key = self.api_key()?;
        Ok(Prepared {
            request: Request::get(endpoints::languages_path(codes, key)),
            scope: Vec::new(),
            label: describe(codes),
        })
    }

    fn prepare_snapshot(
        &self,
        version: &str,
        codes: &[LanguageCode],
    ) -> Result<Prepared, LocalizeError> {
        let key = self.api_key()?;
        Ok(Prepared {
            request: Request::get(endpoints::snapshot_path(version, codes, key)),
            scope: codes.to_vec(),
            label: format!("snapshot {version} ({})", describe(codes)),
        })
    }

    fn spawn<F>(&self, prepared: Prepared, callback: F)
    where
        F: FnOnce(Option<LocalizeError>) + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(e) => {
                callback(Some(LocalizeError::Transport(format!(
                    "no async runtime: {e}"
                ))));
                return;
            }
        };

        let guard = LoadingGuard::enter(&self.loading);
        let loader = self.clone();
        handle.spawn(async move {
            let result = loader.run(prepared).await;
            drop(guard);
            callback(result.err());
        });
    }

    /// Issue the request and merge the response. Only the languages in scope
    /// are decoded; the store is touched only when all of them decode.
    async fn run(&self, prepared: Prepared) -> Result<(), LocalizeError> {
        let Prepared {
            request,
            scope,
            label,
        } = prepared;
        info!("loader: downloading {label} via {}", self.transport.name());

        let result = match self.transport.send(request).await {
            Ok(body) => payload::check_error(body)
                .map(|body| payload::select(body, &scope))
                .and_then(payload::parse_translations),
            Err(e) => Err(e),
        };

        let tables = match result {
            Ok(tables) => tables,
            Err(e) => {
                warn!("loader: {label} failed: {e}");
                return Err(e);
            }
        };

        let mut merged: Vec<&str> = tables.keys().map(String::as_str).collect();
        merged.sort_unstable();
        info!("loader: merged {label} -> [{}]", merged.join(", "));
        self.write().merge_snapshot(tables);
        Ok(())
    }
}

fn describe(codes: &[LanguageCode]) -> String {
    if codes.is_empty() {
        "all languages".to_string()
    } else {
        codes.join(",")
    }
}
