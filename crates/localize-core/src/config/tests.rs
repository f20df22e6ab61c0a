use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.localize.log_level, "info");
    assert_eq!(cfg.api.base_url, "https://localize.to/api");
    assert_eq!(cfg.api.timeout_secs, 30);
    assert!(cfg.api.api_key.is_none());
    assert_eq!(cfg.translations.language, "en");
    assert!(cfg.translations.fallback_language.is_none());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg = parse("").unwrap();
    assert_eq!(cfg.api.base_url, "https://localize.to/api");
    assert_eq!(cfg.translations.language, "en");
}

#[test]
fn test_full_toml() {
    let toml_str = r#"
        [localize]
        log_level = "debug"

        [api]
        base_url = "http://localhost:8080/api"
        api_key = "secret"
        timeout_secs = 5

        [api.headers]
        X-Client = "cli"

        [translations]
        language = "de"
        fallback_language = "en"
        languages = ["de", "en"]
        snapshot = "v3"

        [translations.initial.en]
        greeting = "Hello"
    "#;
    let cfg = parse(toml_str).unwrap();
    assert_eq!(cfg.localize.log_level, "debug");
    assert_eq!(cfg.api.api_key.as_deref(), Some("secret"));
    assert_eq!(cfg.api.timeout_secs, 5);
    assert_eq!(cfg.api.headers["X-Client"], "cli");
    assert_eq!(cfg.translations.languages, vec!["de", "en"]);
    assert_eq!(cfg.translations.snapshot.as_deref(), Some("v3"));
    assert_eq!(cfg.translations.initial["en"]["greeting"], "Hello");
}

#[test]
fn test_bad_toml_is_config_error() {
    let err = parse("[api\nbase_url = 1").unwrap_err();
    assert!(matches!(err, LocalizeError::Config(_)));
}

#[test]
fn test_override_api_key() {
    let mut api = ApiConfig::default();
    api.override_api_key(None);
    assert!(api.api_key.is_none());
    api.override_api_key(Some(String::new()));
    assert!(api.api_key.is_none());
    api.override_api_key(Some("env-key".into()));
    assert_eq!(api.api_key.as_deref(), Some("env-key"));
}

#[test]
fn test_build_store_from_initial() {
    let cfg = parse(
        r#"
        [translations]
        language = "en"
        fallback_language = "fr"
        [translations.initial.fr]
        greeting = "Bonjour"
        "#,
    )
    .unwrap();
    let store = cfg.translations.build_store();
    assert_eq!(store.fallback_language(), Some("fr"));
    assert_eq!(store.resolve("greeting"), "Bonjour");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__localize_test__/localize.toml").unwrap();
    assert_eq!(cfg.translations.language, "en");
}
