//! Request paths for the translation API.
//!
//! Paths are relative to the transport's base URL and carry the API key as
//! the `apikey` query parameter.

/// `/v1/languages[/<codes>]?apikey=<key>`; no codes addresses every language.
pub fn languages_path(codes: &[String], api_key: &str) -> String {
    if codes.is_empty() {
        format!("/v1/languages?apikey={api_key}")
    } else {
        format!("/v1/languages/{}?apikey={api_key}", codes.join(","))
    }
}

/// `/v1/snapshot/<version>[/languages/<codes>]?apikey=<key>`.
pub fn snapshot_path(version: &str, codes: &[String], api_key: &str) -> String {
    if codes.is_empty() {
        format!("/v1/snapshot/{version}?apikey={api_key}")
    } else {
        format!(
            "/v1/snapshot/{version}/languages/{}?apikey={api_key}",
            codes.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_languages_path_all() {
        assert_eq!(languages_path(&[], "k1"), "/v1/languages?apikey=k1");
    }

    #[test]
    fn test_languages_path_explicit() {
        assert_eq!(
            languages_path(&codes(&["en", "fr", "pt-BR"]), "k1"),
            "/v1/languages/en,fr,pt-BR?apikey=k1"
        );
    }

    #[test]
    fn test_snapshot_path() {
        assert_eq!(snapshot_path("v7", &[], "k"), "/v1/snapshot/v7?apikey=k");
        assert_eq!(
            snapshot_path("v7", &codes(&["en", "de"]), "k"),
            "/v1/snapshot/v7/languages/en,de?apikey=k"
        );
    }
}
