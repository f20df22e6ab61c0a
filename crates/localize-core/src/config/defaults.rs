// --- Default value functions ---

pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_base_url() -> String {
    "https://localize.to/api".to_string()
}
pub(super) fn default_timeout_secs() -> u64 {
    30
}
pub(super) fn default_language() -> String {
    crate::types::DEFAULT_LANGUAGE.to_string()
}
