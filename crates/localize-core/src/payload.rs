//! Classification and decoding of translation API responses.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::error::LocalizeError;
use crate::types::{LanguageCode, TranslationSet};

/// Reject payloads carrying an `error` field.
///
/// A string error is passed through verbatim; any other truthy value is
/// rendered as JSON. A falsy `error` (`null`, `false`, `""`, `0`) is treated
/// as absent and removed from the payload.
pub fn check_error(mut payload: Value) -> Result<Value, LocalizeError> {
    let error = match payload.as_object_mut().and_then(|obj| obj.remove("error")) {
        Some(error) => error,
        None => return Ok(payload),
    };
    if is_falsy(&error) {
        return Ok(payload);
    }
    match error {
        Value::String(s) => Err(LocalizeError::Api(s)),
        other => Err(LocalizeError::Api(other.to_string())),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Decode a `{ language: { key: value } }` payload.
///
/// A `null` value marks an untranslated key and is left out of its table.
pub fn parse_translations(payload: Value) -> Result<TranslationSet, LocalizeError> {
    let raw: HashMap<LanguageCode, HashMap<String, Option<String>>> =
        serde_json::from_value(payload).map_err(|e| {
            LocalizeError::Payload(format!("expected language -> key -> string: {e}"))
        })?;
    Ok(raw
        .into_iter()
        .map(|(code, table)| {
            let table = table
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect();
            (code, table)
        })
        .collect())
}

/// Keep only the tables for `codes`; every table when `codes` is empty.
///
/// Runs on the raw payload so that languages outside `codes` are never
/// decoded. Requested codes absent from the payload are skipped so that a
/// previously loaded table is never dropped.
pub fn select(payload: Value, codes: &[LanguageCode]) -> Value {
    if codes.is_empty() {
        return payload;
    }
    let Value::Object(mut tables) = payload else {
        return payload;
    };
    let mut selected = Map::with_capacity(codes.len());
    for code in codes {
        match tables.remove(code) {
            Some(table) => {
                selected.insert(code.clone(), table);
            }
            None => warn!("payload: requested language {code} missing from response"),
        }
    }
    Value::Object(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_error_string() {
        let err = check_error(json!({"error": "Invalid API key"})).unwrap_err();
        assert!(matches!(err, LocalizeError::Api(ref m) if m == "Invalid API key"));
    }

    #[test]
    fn test_check_error_structured() {
        let err = check_error(json!({"error": {"code": 403}})).unwrap_err();
        assert_eq!(err.to_string(), r#"{"code":403}"#);
    }

    #[test]
    fn test_check_error_falsy_is_stripped() {
        let ok = check_error(json!({"error": null, "en": {"a": "A"}})).unwrap();
        assert_eq!(ok, json!({"en": {"a": "A"}}));
        let ok = check_error(json!({"error": false})).unwrap();
        assert_eq!(ok, json!({}));
    }

    #[test]
    fn test_check_error_passes_tables() {
        let body = json!({"en": {"a": "A"}});
        assert_eq!(check_error(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_parse_translations() {
        let set = parse_translations(json!({"en": {"a": "A"}, "fr": {}})).unwrap();
        assert_eq!(set["en"]["a"], "A");
        assert!(set["fr"].is_empty());
    }

    #[test]
    fn test_parse_translations_rejects_bad_shape() {
        let err = parse_translations(json!({"en": ["not", "a", "table"]})).unwrap_err();
        assert!(matches!(err, LocalizeError::Payload(_)));
        assert!(parse_translations(json!("text")).is_err());
    }

    #[test]
    fn test_parse_translations_drops_null_values() {
        let set = parse_translations(json!({"en": {"a": "A", "b": null}})).unwrap();
        assert_eq!(set["en"].len(), 1);
        assert_eq!(set["en"]["a"], "A");
        assert!(!set["en"].contains_key("b"));
    }

    #[test]
    fn test_select_scopes_codes() {
        let body = json!({"en": {}, "fr": {}, "de": {}});
        let picked = select(body, &["en".into(), "fr".into(), "ja".into()]);
        assert_eq!(picked, json!({"en": {}, "fr": {}}));
    }

    #[test]
    fn test_select_ignores_malformed_unrequested_language() {
        let body = json!({"en": {"a": "A"}, "de": {"a": 1}});
        let set = parse_translations(select(body, &["en".into()])).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set["en"]["a"], "A");
    }

    #[test]
    fn test_select_all_when_empty() {
        let body = json!({"en": {}, "de": {}});
        assert_eq!(select(body.clone(), &[]), body);
    }
}
