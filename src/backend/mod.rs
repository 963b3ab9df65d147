//! Backend API client
//!
//! Every user action ends up as exactly one call to the upstream teenyurl API.
//! Handlers talk to it through the [`BackendApi`] trait so tests can swap in
//! a recording fake; production uses [`HttpBackend`].
//!
//! # Status semantics
//!
//! - mutation endpoints succeed on any status `<= 299`
//! - query endpoints succeed on `2xx`
//! - `401` means the session token is no longer valid

mod http;
mod models;

pub use http::HttpBackend;
pub use models::{CreatedLink, Link};

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::constants::BEARER_PREFIX;

// ============ BackendError ============

/// Failures that happen before a status code is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout, broken body...
    Transport(String),
    /// Request body could not be encoded
    Encode(String),
    /// The blocking worker running the request died
    Task(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(msg) => write!(f, "transport error: {}", msg),
            BackendError::Encode(msg) => write!(f, "encode error: {}", msg),
            BackendError::Task(msg) => write!(f, "request task failed: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

// ============ Request / Response ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One outgoing call. `path` is relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            token: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            token: None,
            body: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// What came back: status, the raw `Authorization` header and the decoded
/// JSON body (`Value::Null` when the body was empty or not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub authorization: Option<String>,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            authorization: None,
            body,
        }
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    pub fn is_mutation_success(&self) -> bool {
        self.status <= 299
    }

    pub fn is_query_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Human readable message from the body (`message`, then `error`)
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| self.body.get("error").and_then(Value::as_str))
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }

    /// Session token issued in the `Authorization` header, with the
    /// `Bearer ` prefix stripped. Empty values count as missing.
    pub fn bearer_token(&self) -> Option<String> {
        let raw = self.authorization.as_deref()?.trim_start();
        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

// ============ Trait ============

#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Issue exactly one request. Non-2xx statuses are `Ok`; only transport
    /// level failures are `Err`.
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, BackendError>;

    /// Base URL the client was built with (for health output and logs)
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutation_success_boundary() {
        assert!(ApiResponse::new(200, Value::Null).is_mutation_success());
        assert!(ApiResponse::new(202, Value::Null).is_mutation_success());
        assert!(ApiResponse::new(299, Value::Null).is_mutation_success());
        assert!(!ApiResponse::new(300, Value::Null).is_mutation_success());
        assert!(!ApiResponse::new(401, Value::Null).is_mutation_success());
    }

    #[test]
    fn test_query_success_is_2xx() {
        assert!(ApiResponse::new(200, Value::Null).is_query_success());
        assert!(ApiResponse::new(202, Value::Null).is_query_success());
        assert!(!ApiResponse::new(304, Value::Null).is_query_success());
    }

    #[test]
    fn test_message_prefers_message_field() {
        let resp = ApiResponse::new(400, json!({"message": "invalid url", "error": "x"}));
        assert_eq!(resp.message(), Some("invalid url"));

        let resp = ApiResponse::new(400, json!({"error": "invalid session header"}));
        assert_eq!(resp.message(), Some("invalid session header"));

        let resp = ApiResponse::new(500, Value::Null);
        assert_eq!(resp.message_or("Failed"), "Failed");
    }

    #[test]
    fn test_bearer_token_strips_prefix() {
        let resp = ApiResponse::new(200, Value::Null).with_authorization("Bearer tok123");
        assert_eq!(resp.bearer_token().as_deref(), Some("tok123"));
    }

    #[test]
    fn test_bearer_token_without_prefix_is_used_as_is() {
        let resp = ApiResponse::new(200, Value::Null).with_authorization("tok456");
        assert_eq!(resp.bearer_token().as_deref(), Some("tok456"));
    }

    #[test]
    fn test_bearer_token_missing_or_empty() {
        assert!(ApiResponse::new(200, Value::Null).bearer_token().is_none());
        let resp = ApiResponse::new(200, Value::Null).with_authorization("Bearer ");
        assert!(resp.bearer_token().is_none());
    }

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::post("/links")
            .with_token("abc")
            .with_body(json!({"long_url": "https://example.com"}));
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.token.as_deref(), Some("abc"));
        assert!(req.body.is_some());

        let req = ApiRequest::get("/links");
        assert_eq!(req.method, Method::Get);
        assert!(req.token.is_none());
    }
}
