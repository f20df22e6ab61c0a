use crate::error::LocalizeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// HTTP verb of a [`Request`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON request addressed relative to the transport's base URL.
///
/// A `path` starting with `http` is taken as an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// JSON body; never sent with GET.
    pub body: Option<serde_json::Value>,
    /// Per-request headers, applied over the transport defaults.
    pub headers: HashMap<String, String>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            headers: HashMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Patch, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Put, path, Some(body))
    }

    pub fn delete(path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self::new(Method::Delete, path, body)
    }

    /// Add or override a header for this request only.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Transport trait — the network boundary.
///
/// Implementations issue one request and hand back the decoded JSON body.
/// They do not interpret the payload: an `error` field inside a successful
/// response is classified by the caller (see [`crate::payload`]).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Issue `request` and return the JSON response body.
    async fn send(&self, request: Request) -> Result<serde_json::Value, LocalizeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_constructors() {
        let get = Request::get("/v1/languages");
        assert_eq!(get.method, Method::Get);
        assert!(get.body.is_none());

        let post = Request::post("/v1/keys", json!({"key": "title"}));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.body, Some(json!({"key": "title"})));

        assert_eq!(Request::delete("/v1/keys/a", None).method.as_str(), "DELETE");
    }

    #[test]
    fn test_with_header_overrides() {
        let req = Request::get("/x")
            .with_header("Accept", "text/plain")
            .with_header("Accept", "application/json");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers["Accept"], "application/json");
    }

    #[test]
    fn test_method_serde_uppercase() {
        let m: Method = serde_json::from_str("\"PATCH\"").unwrap();
        assert_eq!(m, Method::Patch);
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
