//! reqwest-backed JSON transport.
//!
//! Relative request paths are joined onto the base URL; a path that already
//! starts with `http` is used as-is. Every request carries
//! `Content-Type: application/json`, overridable by transport-wide and
//! per-request headers (in that order).

use async_trait::async_trait;
use localize_core::{
    config::ApiConfig,
    error::LocalizeError,
    traits::{Method, Request, Transport},
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Headers sent with every request unless overridden.
fn default_headers() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// HTTP transport for the translation API.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    headers: HashMap<String, String>,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            headers: HashMap::new(),
        }
    }

    /// Create from config values.
    pub fn from_config(config: &ApiConfig) -> Result<Self, LocalizeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LocalizeError::Transport(format!("failed to build client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            headers: config.headers.clone(),
        })
    }

    /// Add headers sent with every request.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{path}", self.base_url.trim_end_matches('/'))
        }
    }

    fn headers_for(&self, request: &Request) -> HashMap<String, String> {
        let mut headers = default_headers();
        headers.extend(self.headers.clone());
        headers.extend(request.headers.clone());
        headers
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: Request) -> Result<serde_json::Value, LocalizeError> {
        let url = self.url(&request.path);
        debug!("http: {} {url}", request.method);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);
        for (name, value) in self.headers_for(&request) {
            builder = builder.header(name, value);
        }
        if request.method != Method::Get {
            if let Some(ref body) = request.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| LocalizeError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| LocalizeError::Transport(format!("failed to read response: {e}")))?;

        match serde_json::from_str(&text) {
            Ok(value) => {
                if !status.is_success() {
                    warn!("http: {url} returned {status}");
                }
                Ok(value)
            }
            Err(_) if !status.is_success() => Err(LocalizeError::Transport(format!(
                "server returned {status}: {text}"
            ))),
            Err(e) => Err(LocalizeError::Transport(format!(
                "failed to parse response: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_name() {
        let t = HttpTransport::new("https://localize.to/api");
        assert_eq!(t.name(), "http");
    }

    #[test]
    fn test_url_joins_base() {
        let t = HttpTransport::new("https://localize.to/api/");
        assert_eq!(
            t.url("/v1/languages?apikey=k"),
            "https://localize.to/api/v1/languages?apikey=k"
        );
    }

    #[test]
    fn test_url_absolute_path_kept() {
        let t = HttpTransport::new("https://localize.to/api");
        assert_eq!(
            t.url("http://localhost:9000/v1/languages"),
            "http://localhost:9000/v1/languages"
        );
    }

    #[test]
    fn test_header_precedence() {
        let t = HttpTransport::new("https://localize.to/api").with_headers(HashMap::from([
            ("X-Client".to_string(), "cli".to_string()),
            ("Content-Type".to_string(), "application/vnd+json".to_string()),
        ]));
        let req = Request::get("/v1/languages").with_header("X-Client", "test");
        let headers = t.headers_for(&req);
        assert_eq!(headers["Content-Type"], "application/vnd+json");
        assert_eq!(headers["X-Client"], "test");
    }

    #[test]
    fn test_default_content_type() {
        let t = HttpTransport::new("https://localize.to/api");
        let headers = t.headers_for(&Request::get("/"));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_from_config() {
        let mut cfg = ApiConfig::default();
        cfg.base_url = "http://127.0.0.1:1/api".into();
        cfg.headers.insert("X-Test".into(), "1".into());
        let t = HttpTransport::from_config(&cfg).unwrap();
        assert_eq!(t.url("/v1"), "http://127.0.0.1:1/api/v1");
        assert_eq!(t.headers_for(&Request::get("/"))["X-Test"], "1");
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }
}
